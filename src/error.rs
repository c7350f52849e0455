/// Configuration problems detected while setting up the puzzle engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("piece count must be greater than zero")]
    ZeroPieces,
    #[error("piece count {count} is not a perfect square")]
    NonSquarePieceCount { count: u32 },
    #[error("play surface is empty ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },
    #[error("play surface {width}x{height} leaves no room for the puzzle")]
    SurfaceTooSmall { width: u32, height: u32 },
    #[error("source image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

impl EngineError {
    /// Short text for the player; `Display` carries the details for the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            EngineError::ZeroPieces | EngineError::NonSquarePieceCount { .. } => {
                "This piece count is not supported. Please pick another one."
            }
            EngineError::EmptySurface { .. } | EngineError::SurfaceTooSmall { .. } => {
                "The window is too small for the puzzle. Please enlarge it and try again."
            }
            EngineError::EmptyImage { .. } => "The image is empty. Please try another one.",
        }
    }
}
