use attendance::error::QrError;
use attendance::form::FieldError;
use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("invalid input: {0:?}")]
    Validation(Vec<FieldError>),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("QR generation failed: {0}")]
    Qr(#[from] QrError),
}
