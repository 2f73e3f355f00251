use std::{fmt::Display, sync::Arc};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub trait IntoAppError<R> {
    fn into_app_err<'a>(
        self,
        info: impl Into<Arc<str>>,
        kind: AppErrorKind,
        extra_details: &'a [&'a str],
    ) -> R;
}

#[derive(Debug)]
pub struct AppError {
    kind: AppErrorKind,
    info: Arc<str>,
    detailed_info: Arc<str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum AppErrorKind {
    InvalidInput,
    NotFound,
    Conflict,
    Database,
}

/// The part of an [`AppError`] that is sent to the client.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
struct UserError {
    kind: AppErrorKind,
    info: Arc<str>,
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            info: Arc::clone(&self.info),
            detailed_info: Arc::clone(&self.detailed_info),
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width: usize = 80;

        let kind = self.kind.to_string();
        let header = format!(
            "\n--{kind}{sep}",
            sep = "-".repeat(width.saturating_sub(kind.len() + 2))
        );
        let body = format!(
            "\nINFO: {info}\n\n{details}",
            info = self.info,
            details = self.detailed_info
        );
        let footer = "-".repeat(width);

        write!(f, "{header}{body}\n{footer}")
    }
}

impl Display for AppErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            Self::InvalidInput => "INVALID INPUT",
            Self::NotFound => "NOT FOUND",
            Self::Conflict => "CONFLICT",
            Self::Database => "DATABASE ERROR",
        };

        write!(f, "{str}")
    }
}

impl std::error::Error for AppError {}

impl<E: Display> IntoAppError<AppError> for E {
    fn into_app_err<'a>(
        self,
        info: impl Into<Arc<str>>,
        kind: AppErrorKind,
        extra_details: &'a [&'a str],
    ) -> AppError {
        let app_err = AppError {
            kind,
            info: info.into(),
            detailed_info: AppError::format_detailed_info(self, extra_details),
        };

        app_err.log();
        app_err
    }
}

impl<T, E> IntoAppError<Result<T, AppError>> for Result<T, E>
where
    E: IntoAppError<AppError>,
{
    fn into_app_err<'a>(
        self,
        info: impl Into<Arc<str>>,
        kind: AppErrorKind,
        extra_details: &'a [&'a str],
    ) -> Result<T, AppError> {
        self.map_err(|err| err.into_app_err(info, kind, extra_details))
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.user_err().serialize(serializer)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self.kind {
            AppErrorKind::InvalidInput | AppErrorKind::Conflict => StatusCode::BAD_REQUEST,
            AppErrorKind::NotFound => StatusCode::NOT_FOUND,
            AppErrorKind::Database => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.user_err())
    }
}

impl AppError {
    pub fn new(kind: AppErrorKind, info: impl Into<Arc<str>>, extra_details: &[&str]) -> Self {
        let app_err = Self {
            kind,
            info: info.into(),
            detailed_info: AppError::format_detailed_info("", extra_details),
        };

        app_err.log();
        app_err
    }

    pub fn kind(&self) -> AppErrorKind {
        self.kind
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    // client mistakes are expected traffic, only failures on our side are errors
    fn log(&self) {
        match self.kind {
            AppErrorKind::Database => log::error!("{self}"),
            AppErrorKind::InvalidInput | AppErrorKind::NotFound | AppErrorKind::Conflict => {
                log::warn!("{self}")
            }
        }
    }

    fn format_detailed_info<D: Display>(err: D, extra_details: &[&str]) -> Arc<str> {
        format!(
            "DETAILS:\n{extra}{err}",
            err = if err.to_string().is_empty() {
                "".to_owned()
            } else {
                format!("\n\nERROR: {err}")
            },
            extra = extra_details.join("\n")
        )
        .into()
    }

    fn user_err(&self) -> UserError {
        UserError {
            kind: self.kind,
            info: Arc::clone(&self.info),
        }
    }
}
