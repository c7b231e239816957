use crate::charts::{ChartKind, RenderChart};
use crate::config::AppConfig;
use crate::error::{Error, FetchError, Result};
use crate::fetcher::Fetcher;
use crate::filter::{FrequencyFilter, MAX_THRESHOLD, MIN_THRESHOLD, Threshold};
use crate::results::PageReport;
use crate::{Analyzer, analyze_url};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<Analyzer>,
    fetcher: Fetcher,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, analyzer: Analyzer) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(&config.fetch)?,
            analyzer: Arc::new(analyzer),
            config: Arc::new(config),
        })
    }
}

/// Query string shared by every route; everything is optional
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeParams {
    pub url: Option<String>,
    pub chart: Option<String>,
    pub threshold: Option<String>,
}

impl AnalyzeParams {
    fn threshold(&self, default: u32) -> Result<Threshold> {
        match self.threshold.as_deref().map(str::trim) {
            None | Some("") => Threshold::new(default),
            Some(raw) => {
                let value = raw
                    .parse::<u32>()
                    .map_err(|_| Error::Config(format!("threshold is not a number: {}", raw)))?;
                Threshold::new(value)
            }
        }
    }

    fn chart(&self) -> Result<ChartKind> {
        match self.chart.as_deref() {
            None | Some("") => Ok(ChartKind::default()),
            Some(raw) => raw.parse(),
        }
    }

    fn url(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }
}

/// Routes of the web page and its JSON API
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/analyze", get(analyze_handler))
        .route("/api/chart", get(chart_handler))
        .with_state(state)
}

/// Binds `config.server.bind_addr` and serves until the process exits
pub async fn serve(config: AppConfig) -> Result<()> {
    let bind_addr = config.server.bind_addr.clone();
    let analyzer = Analyzer::from_config(&config);
    let state = AppState::new(config, analyzer)?;

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    ::log::info!("Word frequency page listening on http://{}", bind_addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn run_analysis(state: &AppState, params: &AnalyzeParams) -> Result<PageReport> {
    let threshold = params.threshold(state.config.server.default_threshold)?;
    let filter = FrequencyFilter::new(threshold, state.config.server.top_n)?;
    analyze_url(&state.fetcher, Arc::clone(&state.analyzer), params.url(), filter).await
}

async fn analyze_handler(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Json<PageReport>> {
    let report = run_analysis(&state, &params).await?;
    Ok(Json(report))
}

async fn chart_handler(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Json<Value>> {
    let chart = params.chart()?;
    let report = run_analysis(&state, &params).await?;
    Ok(Json(chart.option(&report.analysis.filtered)))
}

async fn index_handler(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeParams>,
) -> Html<String> {
    let (chart, report) = match params.chart() {
        Ok(chart) => (chart, run_analysis(&state, &params).await),
        Err(e) => (ChartKind::default(), Err(e)),
    };

    let (report, error) = match report {
        Ok(report) => (Some(report), None),
        Err(e) => {
            ::log::warn!("Analysis of {:?} failed: {}", params.url(), e);
            (None, Some(e.user_message()))
        }
    };

    let page = PageView {
        url: params.url(),
        chart,
        threshold: params
            .threshold(state.config.server.default_threshold)
            .map(Threshold::get)
            .unwrap_or(state.config.server.default_threshold),
        top_n: state.config.server.top_n,
        report: report.as_ref(),
        error: error.as_deref(),
    };
    Html(page.render().into_string())
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Fetch(FetchError::Status { .. }) | Error::Fetch(FetchError::Transport(_)) => {
                StatusCode::BAD_GATEWAY
            }
            Error::Fetch(FetchError::InvalidUrl(_))
            | Error::InvalidThreshold(_)
            | Error::UnknownChart(_)
            | Error::Config(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = json!({
            "error": self.to_string(),
            "message": self.user_message(),
        });
        (status, Json(body)).into_response()
    }
}

/// Everything the HTML page needs for one render pass
struct PageView<'a> {
    url: &'a str,
    chart: ChartKind,
    threshold: u32,
    top_n: usize,
    report: Option<&'a PageReport>,
    error: Option<&'a str>,
}

impl PageView<'_> {
    fn render(&self) -> Markup {
        html! {
            (DOCTYPE)
            html lang="zh" {
                head {
                    meta charset="utf-8";
                    title { "词频分析" }
                    style { (PreEscaped(PAGE_CSS)) }
                    @for src in self.chart.scripts() {
                        script src=(src) {}
                    }
                }
                body {
                    (self.sidebar())
                    main {
                        @if let Some(error) = self.error {
                            div class="error" { (error) }
                        }
                        @if let Some(report) = self.report {
                            (self.report_section(report))
                        }
                    }
                }
            }
        }
    }

    fn sidebar(&self) -> Markup {
        html! {
            aside {
                form method="get" action="/" {
                    label {
                        "请输入文章URL"
                        input type="text" name="url" value=(self.url);
                    }
                    label {
                        "选择图表类型"
                        select name="chart" {
                            @for kind in ChartKind::ALL {
                                option value=(kind.as_str()) selected[kind == self.chart] {
                                    (kind.label())
                                }
                            }
                        }
                    }
                    label {
                        "设置最低词频阈值 "
                        output id="threshold-value" { (self.threshold) }
                        input type="range" name="threshold"
                            min=(MIN_THRESHOLD) max=(MAX_THRESHOLD) value=(self.threshold)
                            oninput="document.getElementById('threshold-value').value = this.value";
                    }
                    button type="submit" { "分析" }
                }
            }
        }
    }

    fn report_section(&self, report: &PageReport) -> Markup {
        let option = self.chart.option(&report.analysis.filtered);
        let init = format!(
            "echarts.init(document.getElementById('chart')).setOption({});",
            script_json(&option)
        );

        html! {
            @if let Some(title) = &report.title {
                h1 { (title) }
            }
            p { "词频排名前" (self.top_n) "的词汇：" }
            table {
                thead {
                    tr { th { "#" } th { "词" } th { "频次" } }
                }
                tbody {
                    @for (rank, entry) in report.analysis.ranked.iter().enumerate() {
                        tr { td { (rank + 1) } td { (entry.token) } td { (entry.count) } }
                    }
                }
            }
            div id="chart" {}
            script { (PreEscaped(init)) }
        }
    }
}

/// JSON that cannot close the surrounding `<script>` element
fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

const PAGE_CSS: &str = "body{margin:0;display:flex;font-family:sans-serif}\
aside{width:18rem;padding:1rem;background:#f0f2f6;min-height:100vh}\
aside label{display:block;margin-bottom:1rem}\
aside input[type=text],aside select,aside input[type=range]{width:100%}\
main{flex:1;padding:1rem 2rem}\
.error{padding:.75rem;background:#fde8e8;color:#9b1c1c;margin-bottom:1rem}\
table{border-collapse:collapse}td,th{border:1px solid #ddd;padding:.25rem .75rem}\
#chart{width:100%;height:600px}";
