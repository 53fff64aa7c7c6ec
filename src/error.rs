use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum MotionError {
    #[error("no {0} on this page")]
    MissingTarget(&'static str),

    #[error("browser call failed: {0}")]
    Js(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<JsValue> for MotionError {
    fn from(value: JsValue) -> Self {
        MotionError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub type Result<T> = std::result::Result<T, MotionError>;
