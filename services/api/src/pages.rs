use askama::Template;
use scholar_detect::analysis::Verdict;
use scholar_detect::error::AppError;
use scholar_detect::report::{verdict_icon, AnalysisView};

const BYTES_PER_MB: usize = 1024 * 1024;

#[derive(Template)]
#[template(path = "upload.html")]
struct UploadPage<'a> {
    error: Option<&'a str>,
    max_upload_mb: usize,
}

#[derive(Template)]
#[template(path = "result.html")]
struct ResultPage<'a> {
    file_name: &'a str,
    status_class: &'static str,
    verdict_icon: &'static str,
    view: &'a AnalysisView,
}

pub(crate) fn upload_page(error: Option<&str>, max_upload_bytes: usize) -> Result<String, AppError> {
    UploadPage {
        error,
        max_upload_mb: max_upload_bytes.div_ceil(BYTES_PER_MB),
    }
    .render()
    .map_err(|err| AppError::Render(err.to_string()))
}

pub(crate) fn result_page(file_name: Option<&str>, view: &AnalysisView) -> Result<String, AppError> {
    let status_class = match view.verdict {
        Verdict::Scholarly => "success",
        Verdict::Popular => "warning",
    };
    ResultPage {
        file_name: file_name.filter(|name| !name.is_empty()).unwrap_or("document.pdf"),
        status_class,
        verdict_icon: verdict_icon(view.verdict),
        view,
    }
    .render()
    .map_err(|err| AppError::Render(err.to_string()))
}
