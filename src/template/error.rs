use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Invalid value for frequency {frequency} at marker '{label}'")]
    InvalidFrequency { label: String, frequency: f64 },

    #[error("Not all frequencies are specified (marker '{label}' is unset)")]
    UnsetFrequency { label: String },

    #[error("Map type must be 'physical' or 'genetic' (got '{0}')")]
    InvalidMapType(String),

    #[error("Marker index {index} out of bounds for {nmark} markers")]
    MarkerOutOfBounds { index: usize, nmark: usize },

    #[error("Template contains no markers")]
    EmptyTemplate,
}
