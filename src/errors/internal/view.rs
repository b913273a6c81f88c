use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Rendering view {view} failed: {source}")]
    Render {
        view: String,
        #[source]
        source: minijinja::Error,
    },
}
