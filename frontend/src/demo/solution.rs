use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::api::{DemoAnswer, DemoBackend, DemoError, HttpDemoBackend};
use super::{
    DemoExample, ANALYZING, API_UNAVAILABLE, SOLUTION_RATE_LIMITED, SOLUTION_RATE_LIMIT_HINT,
};
use crate::config::Config;
use crate::utils::generation::{Generation, Ticket};

/// What the solution result panel shows. Each state fully replaces the last.
#[derive(Debug, Clone, PartialEq)]
pub enum SolutionState {
    Idle,
    Loading,
    Success {
        answer: String,
        time_suffix: Option<String>,
    },
    RateLimited,
    Failed,
}

impl SolutionState {
    pub fn from_result(result: Result<DemoAnswer, DemoError>) -> Self {
        match result {
            Ok(answer) => SolutionState::Success {
                time_suffix: format_processing_time(answer.processing_time_ms),
                answer: answer.answer,
            },
            Err(DemoError::RateLimited) => SolutionState::RateLimited,
            Err(e) => {
                tracing::warn!("API call failed: {}", e);
                SolutionState::Failed
            }
        }
    }
}

/// `Some("(842ms)")` for a usable timing; absent or zero timings show nothing.
pub fn format_processing_time(ms: Option<f64>) -> Option<String> {
    ms.filter(|t| t.is_finite() && *t != 0.0)
        .map(|t| format!("({}ms)", t.round() as i64))
}

pub async fn ask_solution<B: DemoBackend + ?Sized>(backend: &B, query: &str) -> SolutionState {
    SolutionState::from_result(backend.ask(query).await)
}

/// Like [`ask_solution`], but yields nothing once a newer question has been
/// asked while this one was in flight.
pub async fn ask_solution_latest<B: DemoBackend + ?Sized>(
    backend: &B,
    query: &str,
    ticket: &Ticket,
) -> Option<SolutionState> {
    let next = ask_solution(backend, query).await;
    ticket.is_current().then_some(next)
}

pub fn solution_view(state: &SolutionState) -> Html {
    match state {
        SolutionState::Idle => html! {
            <div class="result-placeholder">{"Задайте вопрос или выберите пример ниже"}</div>
        },
        SolutionState::Loading => html! {
            <div class="result-loading"><span class="spinner"></span>{" "}{ANALYZING}</div>
        },
        SolutionState::Success { answer, time_suffix } => html! {
            <div class="result-content">
                <pre>{answer.clone()}</pre>
                if let Some(suffix) = time_suffix {
                    <>{" "}<span class="processing-time">{suffix.clone()}</span></>
                }
            </div>
        },
        SolutionState::RateLimited => html! {
            <div class="result-error">
                <span class="warning">{SOLUTION_RATE_LIMITED}</span>
                <p>{SOLUTION_RATE_LIMIT_HINT}</p>
            </div>
        },
        SolutionState::Failed => html! {
            <div class="result-error"><span class="warning">{API_UNAVAILABLE}</span></div>
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct SolutionDemoProps {
    pub examples: &'static [DemoExample],
    pub pipeline: Callback<()>,
}

#[function_component(SolutionDemo)]
pub fn solution_demo(props: &SolutionDemoProps) -> Html {
    let config = use_context::<Config>().unwrap_or_default();
    let question = use_state(String::new);
    let state = use_state(|| SolutionState::Idle);
    let generation = use_state(Generation::default);

    let ask = {
        let state = state.clone();
        let generation = (*generation).clone();
        let pipeline = props.pipeline.clone();
        Callback::from(move |query: String| {
            let query = query.trim().to_string();
            if query.is_empty() {
                return;
            }
            let ticket = generation.begin();
            pipeline.emit(());
            state.set(SolutionState::Loading);

            let backend = HttpDemoBackend::new(config.clone());
            let state = state.clone();
            spawn_local(async move {
                if let Some(next) = ask_solution_latest(&backend, &query, &ticket).await {
                    state.set(next);
                }
            });
        })
    };

    let oninput = {
        let question = question.clone();
        Callback::from(move |e: InputEvent| {
            question.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let onkeypress = {
        let question = question.clone();
        let ask = ask.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                ask.emit((*question).clone());
            }
        })
    };

    let on_ask = {
        let question = question.clone();
        let ask = ask.clone();
        Callback::from(move |_: MouseEvent| ask.emit((*question).clone()))
    };

    html! {
        <div class="solution-demo">
            <div class="solution-input-row">
                <input
                    id="question-input"
                    class="question-input"
                    type="text"
                    placeholder="Например: где обрабатываются платежи?"
                    aria-label="Вопрос о коде"
                    value={(*question).clone()}
                    {oninput}
                    {onkeypress}
                />
                <button id="ask-btn" class="btn btn-primary" type="button" onclick={on_ask}>{"Спросить"}</button>
            </div>
            <div class="demo-examples">
                { for props.examples.iter().map(|example| {
                    let ask = ask.clone();
                    let question = question.clone();
                    let query = example.query;
                    let onclick = Callback::from(move |_: MouseEvent| {
                        question.set(query.to_string());
                        ask.emit(query.to_string());
                    });
                    html! {
                        <button type="button" class="demo-example-btn" data-query={query} {onclick}>
                            {example.label}
                        </button>
                    }
                }) }
            </div>
            <div id="demo-result" class="demo-result" aria-live="polite">
                { solution_view(&state) }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::api::RequestError;
    use async_trait::async_trait;
    use futures::executor::block_on;

    struct FakeBackend(Result<DemoAnswer, DemoError>);

    #[async_trait(?Send)]
    impl DemoBackend for FakeBackend {
        async fn ask(&self, _query: &str) -> Result<DemoAnswer, DemoError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_success_with_timing() {
        let backend = FakeBackend(Ok(DemoAnswer {
            answer: "A function is ...".into(),
            processing_time_ms: Some(120.0),
        }));
        let state = block_on(ask_solution(&backend, "What is a function?"));
        assert_eq!(
            state,
            SolutionState::Success {
                answer: "A function is ...".into(),
                time_suffix: Some("(120ms)".into()),
            }
        );
    }

    /// Answers, but only after a newer question has been asked.
    struct OvertakenBackend {
        generation: Generation,
    }

    #[async_trait(?Send)]
    impl DemoBackend for OvertakenBackend {
        async fn ask(&self, _query: &str) -> Result<DemoAnswer, DemoError> {
            self.generation.begin();
            Ok(DemoAnswer {
                answer: "stale".into(),
                processing_time_ms: Some(50.0),
            })
        }
    }

    #[test]
    fn test_answer_for_superseded_question_is_dropped() {
        let generation = Generation::default();
        let ticket = generation.begin();
        let backend = OvertakenBackend {
            generation: generation.clone(),
        };
        assert_eq!(block_on(ask_solution_latest(&backend, "old", &ticket)), None);
    }

    #[test]
    fn test_latest_question_gets_its_answer() {
        let generation = Generation::default();
        let _older = generation.begin();
        let ticket = generation.begin();
        let backend = FakeBackend(Err(DemoError::RateLimited));
        assert_eq!(
            block_on(ask_solution_latest(&backend, "new", &ticket)),
            Some(SolutionState::RateLimited)
        );
    }

    #[test]
    fn test_rate_limit_is_distinct_from_failure() {
        let state = block_on(ask_solution(&FakeBackend(Err(DemoError::RateLimited)), "q"));
        assert_eq!(state, SolutionState::RateLimited);
        assert_ne!(state, SolutionState::Failed);
    }

    #[test]
    fn test_everything_else_collapses_to_failed() {
        let errors = vec![
            DemoError::Status(500),
            DemoError::Status(404),
            DemoError::Decode("missing field `answer`".into()),
            DemoError::Request(RequestError::Timeout(180_000)),
            DemoError::Request(RequestError::Transport("offline".into())),
        ];
        for error in errors {
            let state = block_on(ask_solution(&FakeBackend(Err(error)), "q"));
            assert_eq!(state, SolutionState::Failed);
        }
    }

    #[test]
    fn test_processing_time_formatting() {
        assert_eq!(format_processing_time(Some(842.0)), Some("(842ms)".into()));
        assert_eq!(format_processing_time(Some(842.4)), Some("(842ms)".into()));
        assert_eq!(format_processing_time(Some(842.5)), Some("(843ms)".into()));
        assert_eq!(format_processing_time(Some(0.0)), None);
        assert_eq!(format_processing_time(Some(f64::NAN)), None);
        assert_eq!(format_processing_time(None), None);
    }

    #[test]
    fn test_answer_without_timing_has_no_suffix() {
        let state = SolutionState::from_result(Ok(DemoAnswer {
            answer: "ok".into(),
            processing_time_ms: None,
        }));
        assert_eq!(
            state,
            SolutionState::Success {
                answer: "ok".into(),
                time_suffix: None,
            }
        );
    }
}
