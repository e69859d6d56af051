use std::net::SocketAddr;

use askama::Template;
use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::booking::intake::{self, IntakeOutcome};
use crate::booking::pipeline::{FAILURE_NOTICE, SUCCESS_NOTICE};
use crate::booking::{BookingForm, FieldErrors, SERVICES, client_ip, parser};
use crate::error::AppError;
use crate::models::Appointment;
use crate::state::SharedState;

struct Notice {
    kind: &'static str,
    text: String,
}

impl Notice {
    fn success() -> Self {
        Notice {
            kind: "success",
            text: SUCCESS_NOTICE.to_string(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Notice {
            kind: "error",
            text: text.into(),
        }
    }
}

struct AppointmentRow {
    name: String,
    service: String,
    date: String,
    image_url: String,
}

impl From<&Appointment> for AppointmentRow {
    fn from(item: &Appointment) -> Self {
        AppointmentRow {
            name: item.record.name.clone(),
            service: item.record.service.clone(),
            date: item.display_date().to_string(),
            image_url: item.record.image_url.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    services: Vec<&'static str>,
    form: BookingForm,
    errors: FieldErrors,
    notice: Option<Notice>,
    honeypot_field: Option<String>,
    appointments: Vec<AppointmentRow>,
}

pub async fn index(State(state): State<SharedState>) -> Result<Response, AppError> {
    state.loader.refresh().await?;
    render(&state, BookingForm::default(), FieldErrors::default(), None, StatusCode::OK).await
}

pub async fn submit(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let parsed = match parser::parse(&headers, body).await {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Unreadable booking form: {e}");
            return render(
                &state,
                BookingForm::default(),
                FieldErrors::default(),
                Some(Notice::error(FAILURE_NOTICE)),
                StatusCode::BAD_REQUEST,
            )
            .await;
        }
    };
    let form = BookingForm::from_fields(&parsed.fields);
    let ip = client_ip::resolve(&headers, addr.ip(), &state.config.trusted_proxies);

    match intake::accept(&state, ip, &form, &parsed.fields, parsed.attachment).await {
        Ok(IntakeOutcome::Stored(_)) | Ok(IntakeOutcome::Discarded) => {
            render(
                &state,
                BookingForm::default(),
                FieldErrors::default(),
                Some(Notice::success()),
                StatusCode::OK,
            )
            .await
        }
        Err(AppError::Validation(errors)) => {
            render(&state, form, errors, None, StatusCode::UNPROCESSABLE_ENTITY).await
        }
        Err(AppError::RateLimited(secs)) => {
            let notice = Notice::error(format!(
                "Too many requests. Please try again in {secs} seconds."
            ));
            render(
                &state,
                form,
                FieldErrors::default(),
                Some(notice),
                StatusCode::TOO_MANY_REQUESTS,
            )
            .await
        }
        Err(AppError::Submission(err)) => {
            tracing::error!("Error submitting request: {err}");
            render(
                &state,
                form,
                FieldErrors::default(),
                Some(Notice::error(FAILURE_NOTICE)),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .await
        }
        Err(other) => Err(other),
    }
}

async fn render(
    state: &SharedState,
    form: BookingForm,
    errors: FieldErrors,
    notice: Option<Notice>,
    status: StatusCode,
) -> Result<Response, AppError> {
    let appointments = state
        .loader
        .snapshot()
        .await
        .iter()
        .map(AppointmentRow::from)
        .collect();

    let template = HomeTemplate {
        services: SERVICES.to_vec(),
        form,
        errors,
        notice,
        honeypot_field: state.config.honeypot_field.clone(),
        appointments,
    };

    let html = template
        .render()
        .map_err(|e| AppError::Internal(format!("Template render failed: {e}")))?;
    Ok((status, Html(html)).into_response())
}
