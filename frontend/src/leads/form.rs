use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use thiserror::Error;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::validation::{validate, FieldErrors, LeadDraft, LeadField, LeadRequest};
use crate::config::Config;
use crate::utils::api::{Api, RequestError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LeadError {
    #[error("Too many lead submissions")]
    RateLimited,
    #[error("Server error: {0}")]
    Status(u16),
    #[error(transparent)]
    Request(#[from] RequestError),
}

pub fn check_lead_status(status: u16) -> Result<(), LeadError> {
    match status {
        200..=299 => Ok(()),
        429 => Err(LeadError::RateLimited),
        other => Err(LeadError::Status(other)),
    }
}

/// Destination for validated leads.
#[async_trait(?Send)]
pub trait LeadBackend {
    async fn submit(&self, request: &LeadRequest) -> Result<(), LeadError>;
}

pub struct HttpLeadBackend {
    config: Config,
}

impl HttpLeadBackend {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl LeadBackend for HttpLeadBackend {
    async fn submit(&self, request: &LeadRequest) -> Result<(), LeadError> {
        let response = Api::post(&self.config.leads_url())
            .json(request)?
            .send_with_timeout(self.config.api_timeout_ms)
            .await?;
        check_lead_status(response.status())
    }
}

/// Validates the draft and, only if every field passes, hands it to the
/// backend. Field problems come back without any request being made.
pub async fn submit_draft<B: LeadBackend + ?Sized>(
    draft: &LeadDraft,
    backend: &B,
) -> Result<SubmitState, FieldErrors> {
    let request = validate(draft)?;
    let result = backend.submit(&request).await;
    match &result {
        Ok(()) => tracing::info!("Lead submitted for {}", request.company),
        Err(e) => tracing::error!("Form submission error: {}", e),
    }
    Ok(SubmitState::after(&result))
}

/// Submit button lifecycle. Anything but `Idle` keeps the button disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Sending,
    Sent,
    TooManyRequests,
    Failed,
}

impl SubmitState {
    pub fn after(result: &Result<(), LeadError>) -> Self {
        match result {
            Ok(()) => SubmitState::Sent,
            Err(LeadError::RateLimited) => SubmitState::TooManyRequests,
            Err(_) => SubmitState::Failed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SubmitState::Idle => "Запросить демо",
            SubmitState::Sending => "Отправка...",
            SubmitState::Sent => "Заявка отправлена!",
            SubmitState::TooManyRequests => "Слишком много запросов",
            SubmitState::Failed => "Ошибка отправки",
        }
    }

    pub fn background(self) -> Option<&'static str> {
        match self {
            SubmitState::Sent => Some("#10B981"),
            SubmitState::TooManyRequests | SubmitState::Failed => Some("#EF4444"),
            SubmitState::Idle | SubmitState::Sending => None,
        }
    }

    pub fn is_busy(self) -> bool {
        self != SubmitState::Idle
    }
}

const TEAM_SIZES: [&str; 4] = ["1-10", "11-50", "51-200", "200+"];
const LANGUAGES: [&str; 6] = ["Python", "Java", "Go", "C#", "JavaScript/TypeScript", "C/C++"];

#[function_component(LeadForm)]
pub fn lead_form() -> Html {
    let config = use_context::<Config>().unwrap_or_default();
    let draft = use_state(LeadDraft::default);
    let errors = use_state(FieldErrors::new);
    let submit_state = use_state(|| SubmitState::Idle);

    let update = {
        let draft = draft.clone();
        let errors = errors.clone();
        move |field: LeadField, value: String| {
            draft.set(draft.with(field, value));
            if errors.contains_key(&field) {
                let mut remaining = (*errors).clone();
                remaining.remove(&field);
                errors.set(remaining);
            }
        }
    };

    let onsubmit = {
        let draft = draft.clone();
        let errors = errors.clone();
        let submit_state = submit_state.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if submit_state.is_busy() {
                return;
            }
            submit_state.set(SubmitState::Sending);

            let backend = HttpLeadBackend::new(config.clone());
            let notice_ms = config.notice_ms;
            let draft = draft.clone();
            let errors = errors.clone();
            let submit_state = submit_state.clone();
            spawn_local(async move {
                let next = match submit_draft(&draft, &backend).await {
                    Ok(next) => next,
                    Err(found) => {
                        errors.set(found);
                        submit_state.set(SubmitState::Idle);
                        return;
                    }
                };
                errors.set(FieldErrors::new());
                if next == SubmitState::Sent {
                    draft.set(LeadDraft::default());
                }
                submit_state.set(next);
                TimeoutFuture::new(notice_ms).await;
                submit_state.set(SubmitState::Idle);
            });
        })
    };

    let text_field = |field: LeadField, label: &'static str, kind: &'static str| {
        let update = update.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            update(field, e.target_unchecked_into::<HtmlInputElement>().value());
        });
        let problem = errors.get(&field).copied();
        html! {
            <div class="form-group">
                <label for={field.id()}>
                    {label}
                    if field.is_required() { <span class="required">{" *"}</span> }
                </label>
                <input
                    id={field.id()}
                    name={field.id()}
                    type={kind}
                    class={classes!("form-input", problem.map(|_| "error"))}
                    value={draft.get(field).to_string()}
                    required={field.is_required()}
                    aria-invalid={problem.is_some().to_string()}
                    title={problem.map(|p| p.message())}
                    {oninput}
                />
                if let Some(problem) = problem {
                    <span class="form-error">{problem.message()}</span>
                }
            </div>
        }
    };

    let select_field = |field: LeadField, label: &'static str, options: &'static [&'static str]| {
        let update = update.clone();
        let onchange = Callback::from(move |e: Event| {
            update(field, e.target_unchecked_into::<HtmlSelectElement>().value());
        });
        let current = draft.get(field).to_string();
        html! {
            <div class="form-group">
                <label for={field.id()}>{label}</label>
                <select id={field.id()} name={field.id()} class="form-input" {onchange}>
                    <option value="" selected={current.is_empty()}>{"Не выбрано"}</option>
                    { for options.iter().map(|option| html! {
                        <option value={*option} selected={current == *option}>{*option}</option>
                    }) }
                </select>
            </div>
        }
    };

    let state = *submit_state;
    let button_style = state
        .background()
        .map(|color| format!("background: {}", color))
        .unwrap_or_default();

    html! {
        <form id="demo-form" class="demo-form" novalidate={true} {onsubmit}>
            <div class="form-row">
                { text_field(LeadField::Name, "Имя", "text") }
                { text_field(LeadField::Email, "Рабочий email", "email") }
            </div>
            <div class="form-row">
                { text_field(LeadField::Company, "Компания", "text") }
                { text_field(LeadField::Position, "Должность", "text") }
            </div>
            <div class="form-row">
                { select_field(LeadField::TeamSize, "Размер команды", &TEAM_SIZES) }
                { select_field(LeadField::Language, "Основной язык", &LANGUAGES) }
            </div>
            <button type="submit" class="btn btn-primary btn-block" disabled={state.is_busy()} style={button_style}>
                {state.label()}
            </button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::validation::FieldProblem;
    use futures::executor::block_on;
    use std::cell::RefCell;

    struct RecordingBackend {
        result: Result<(), LeadError>,
        received: RefCell<Vec<LeadRequest>>,
    }

    impl RecordingBackend {
        fn replying(result: Result<(), LeadError>) -> Self {
            Self {
                result,
                received: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl LeadBackend for RecordingBackend {
        async fn submit(&self, request: &LeadRequest) -> Result<(), LeadError> {
            self.received.borrow_mut().push(request.clone());
            self.result.clone()
        }
    }

    fn complete_draft() -> LeadDraft {
        LeadDraft::default()
            .with(LeadField::Name, "Анна".into())
            .with(LeadField::Email, "anna@example.ru".into())
            .with(LeadField::Company, "ООО Ромашка".into())
    }

    #[test]
    fn test_incomplete_draft_never_reaches_backend() {
        let backend = RecordingBackend::replying(Ok(()));
        let draft = complete_draft()
            .with(LeadField::Email, String::new())
            .with(LeadField::Company, "  ".into());

        let errors = block_on(submit_draft(&draft, &backend)).unwrap_err();
        assert!(backend.received.borrow().is_empty());
        assert_eq!(
            errors.keys().copied().collect::<Vec<_>>(),
            vec![LeadField::Email, LeadField::Company]
        );
        assert!(errors.values().all(|p| *p == FieldProblem::Missing));
    }

    #[test]
    fn test_bad_email_never_reaches_backend() {
        let backend = RecordingBackend::replying(Ok(()));
        let draft = complete_draft().with(LeadField::Email, "anna@".into());

        let errors = block_on(submit_draft(&draft, &backend)).unwrap_err();
        assert!(backend.received.borrow().is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(&LeadField::Email), Some(&FieldProblem::InvalidEmail));
    }

    #[test]
    fn test_complete_draft_is_sent_once() {
        let backend = RecordingBackend::replying(Ok(()));
        let state = block_on(submit_draft(&complete_draft(), &backend));
        assert_eq!(state, Ok(SubmitState::Sent));

        let received = backend.received.borrow();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].company, "ООО Ромашка");
    }

    #[test]
    fn test_rate_limited_submission() {
        let backend = RecordingBackend::replying(Err(LeadError::RateLimited));
        let state = block_on(submit_draft(&complete_draft(), &backend));
        assert_eq!(state, Ok(SubmitState::TooManyRequests));
    }

    #[test]
    fn test_lead_status_classification() {
        assert_eq!(check_lead_status(201), Ok(()));
        assert_eq!(check_lead_status(429), Err(LeadError::RateLimited));
        assert_eq!(check_lead_status(422), Err(LeadError::Status(422)));
    }

    #[test]
    fn test_submit_state_after_result() {
        assert_eq!(SubmitState::after(&Ok(())), SubmitState::Sent);
        assert_eq!(SubmitState::after(&Err(LeadError::RateLimited)), SubmitState::TooManyRequests);
        assert_eq!(SubmitState::after(&Err(LeadError::Status(500))), SubmitState::Failed);
        assert_eq!(
            SubmitState::after(&Err(LeadError::Request(RequestError::Transport("offline".into())))),
            SubmitState::Failed
        );
    }

    #[test]
    fn test_button_is_locked_outside_idle() {
        assert!(!SubmitState::Idle.is_busy());
        let locked = [
            SubmitState::Sending,
            SubmitState::Sent,
            SubmitState::TooManyRequests,
            SubmitState::Failed,
        ];
        for state in locked {
            assert!(state.is_busy());
        }
        assert_eq!(SubmitState::Sent.background(), Some("#10B981"));
        assert_eq!(SubmitState::Sending.background(), None);
    }
}
