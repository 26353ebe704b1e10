use crate::error::AppError;
use crate::models::AnalysisResult;
use async_trait::async_trait;

/// Defines the public interface for a Dignity Index classifier.
///
/// Implementations send the text to some scoring backend and return the
/// parsed result. Every failure is reported as `AppError::AnalysisFailed`;
/// callers do not distinguish between causes.
#[async_trait]
pub trait DignityClassifier: Send + Sync + 'static {
    /// Classifies `text`. The caller guarantees it is not blank.
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AppError>;
}
