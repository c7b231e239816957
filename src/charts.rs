use crate::error::Error;
use crate::frequency::FrequencyMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::str::FromStr;

const ECHARTS_JS: &str = "https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js";
const WORDCLOUD_JS: &str =
    "https://cdn.jsdelivr.net/npm/echarts-wordcloud@2/dist/echarts-wordcloud.min.js";

/// Chart types offered in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Wordcloud,
    Bar,
    Pie,
    Line,
    Scatter,
    Radar,
    Candlestick,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::Wordcloud,
        ChartKind::Bar,
        ChartKind::Pie,
        ChartKind::Line,
        ChartKind::Scatter,
        ChartKind::Radar,
        ChartKind::Candlestick,
    ];

    /// Identifier used in query strings
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Wordcloud => "wordcloud",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Line => "line",
            ChartKind::Scatter => "scatter",
            ChartKind::Radar => "radar",
            ChartKind::Candlestick => "candlestick",
        }
    }

    /// Label shown in the chart selector
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Wordcloud => "词云",
            ChartKind::Bar => "柱状图",
            ChartKind::Pie => "饼图",
            ChartKind::Line => "折线图",
            ChartKind::Scatter => "散点图",
            ChartKind::Radar => "雷达图",
            ChartKind::Candlestick => "K线图",
        }
    }
}

impl FromStr for ChartKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s || kind.label() == s)
            .ok_or_else(|| Error::UnknownChart(s.to_string()))
    }
}

/// Something that turns a frequency map into an ECharts option
pub trait RenderChart {
    /// Chart title
    fn title(&self) -> &'static str;

    /// Scripts the browser must load before calling `setOption`
    fn scripts(&self) -> Vec<&'static str>;

    /// ECharts option document for `map`; an empty map gives empty series
    fn option(&self, map: &FrequencyMap) -> Value;
}

impl RenderChart for ChartKind {
    fn title(&self) -> &'static str {
        match self {
            ChartKind::Wordcloud => "词云",
            ChartKind::Bar => "Word Frequency - Bar",
            ChartKind::Pie => "词频分布",
            ChartKind::Line => "Word Frequency - Line",
            ChartKind::Scatter => "散点图",
            ChartKind::Radar => "词频雷达图",
            ChartKind::Candlestick => "K线图",
        }
    }

    fn scripts(&self) -> Vec<&'static str> {
        match self {
            ChartKind::Wordcloud => vec![ECHARTS_JS, WORDCLOUD_JS],
            _ => vec![ECHARTS_JS],
        }
    }

    fn option(&self, map: &FrequencyMap) -> Value {
        let build: fn(&FrequencyMap) -> Value = match self {
            ChartKind::Wordcloud => wordcloud,
            ChartKind::Bar => bar,
            ChartKind::Pie => pie,
            ChartKind::Line => line,
            ChartKind::Scatter => scatter,
            ChartKind::Radar => radar,
            ChartKind::Candlestick => candlestick,
        };

        let mut option = build(map);
        option["title"] = json!({ "text": self.title() });
        option["tooltip"] = json!({});
        option
    }
}

fn tokens(map: &FrequencyMap) -> Vec<&str> {
    map.iter().map(|(token, _)| token).collect()
}

fn counts(map: &FrequencyMap) -> Vec<u64> {
    map.iter().map(|(_, count)| count).collect()
}

fn named_values(map: &FrequencyMap) -> Vec<Value> {
    map.iter()
        .map(|(token, count)| json!({ "name": token, "value": count }))
        .collect()
}

/// Category x-axis with one series of the given type
fn category_series(map: &FrequencyMap, series_type: &str) -> Value {
    json!({
        "xAxis": { "type": "category", "name": "Words", "data": tokens(map) },
        "yAxis": { "type": "value", "name": "Frequency" },
        "series": [{ "name": "词频", "type": series_type, "data": counts(map) }]
    })
}

fn wordcloud(map: &FrequencyMap) -> Value {
    json!({
        "series": [{
            "type": "wordCloud",
            "sizeRange": [20, 100],
            "data": named_values(map)
        }]
    })
}

fn bar(map: &FrequencyMap) -> Value {
    category_series(map, "bar")
}

fn pie(map: &FrequencyMap) -> Value {
    json!({
        "series": [{
            "type": "pie",
            "radius": "60%",
            "startAngle": 140,
            "label": { "formatter": "{b}: {d}%" },
            "data": named_values(map)
        }]
    })
}

fn line(map: &FrequencyMap) -> Value {
    let mut option = category_series(map, "line");
    option["series"][0]["showSymbol"] = json!(true);
    option
}

fn scatter(map: &FrequencyMap) -> Value {
    category_series(map, "scatter")
}

fn radar(map: &FrequencyMap) -> Value {
    let max = map.iter().map(|(_, count)| count).max().unwrap_or(0);
    let indicator: Vec<Value> = map
        .iter()
        .map(|(token, _)| json!({ "name": token, "max": max }))
        .collect();

    json!({
        "radar": { "indicator": indicator },
        "series": [{
            "type": "radar",
            "areaStyle": {},
            "data": [{ "name": "Frequency", "value": counts(map) }]
        }]
    })
}

/// Each count becomes a candle rising from zero to the count
fn candlestick(map: &FrequencyMap) -> Value {
    let candles: Vec<[u64; 4]> = map.iter().map(|(_, count)| [0, count, 0, count]).collect();
    json!({
        "xAxis": { "type": "category", "data": tokens(map) },
        "yAxis": { "type": "value" },
        "series": [{ "name": "词频", "type": "candlestick", "data": candles }]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FrequencyMap {
        [("你好", 3u64), ("世界", 1)].into_iter().collect()
    }

    #[test]
    fn test_parse_chart_kind() {
        assert_eq!("bar".parse::<ChartKind>().unwrap(), ChartKind::Bar);
        assert_eq!("K线图".parse::<ChartKind>().unwrap(), ChartKind::Candlestick);
        assert!(matches!(
            "histogram".parse::<ChartKind>(),
            Err(Error::UnknownChart(_))
        ));
    }

    #[test]
    fn test_as_str_round_trips() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.as_str().parse::<ChartKind>().unwrap(), kind);
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_empty_map_renders_every_kind() {
        let empty = FrequencyMap::new();
        for kind in ChartKind::ALL {
            let option = kind.option(&empty);
            assert_eq!(option["title"]["text"], kind.title());
            let series = option["series"].as_array().unwrap();
            assert_eq!(series.len(), 1, "{:?}", kind);
        }
    }

    #[test]
    fn test_bar_option() {
        let option = ChartKind::Bar.option(&sample());
        assert_eq!(option["xAxis"]["data"], json!(["你好", "世界"]));
        assert_eq!(option["series"][0]["data"], json!([3, 1]));
        assert_eq!(option["series"][0]["type"], "bar");
    }

    #[test]
    fn test_wordcloud_option() {
        let option = ChartKind::Wordcloud.option(&sample());
        assert_eq!(option["series"][0]["sizeRange"], json!([20, 100]));
        assert_eq!(
            option["series"][0]["data"][0],
            json!({ "name": "你好", "value": 3 })
        );
        assert_eq!(ChartKind::Wordcloud.scripts().len(), 2);
    }

    #[test]
    fn test_radar_indicators_share_max() {
        let option = ChartKind::Radar.option(&sample());
        let indicator = option["radar"]["indicator"].as_array().unwrap();
        assert_eq!(indicator.len(), 2);
        assert!(indicator.iter().all(|i| i["max"] == 3));
    }

    #[test]
    fn test_candlestick_option() {
        let option = ChartKind::Candlestick.option(&sample());
        assert_eq!(option["series"][0]["data"][0], json!([0, 3, 0, 3]));
    }
}
