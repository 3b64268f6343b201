use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("route name is empty")]
    EmptyName,
    #[error("route name '{name}' contains an empty label")]
    EmptyLabel { name: String },
}

pub type PathResult<T> = Result<T, PathError>;
