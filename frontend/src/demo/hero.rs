use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::api::{DemoBackend, DemoError, HttpDemoBackend};
use super::typing::{reveal_markup, type_plain, ElementSink, GlooSleeper, RevealSink, Sleeper};
use super::{DemoExample, ANALYZING, API_UNAVAILABLE, HERO_RATE_LIMITED, MORE_LINK};
use crate::config::Config;
use crate::utils::dom::scroll_to_section;
use crate::utils::generation::{Generation, Ticket};
use crate::utils::html::{escape_html, truncate_for_display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroOutcome {
    Revealed { truncated: bool },
    RateLimited,
    Failed,
    /// A newer query took over the terminal before this one finished.
    Superseded,
}

pub fn loading_markup() -> String {
    format!(r#"<span class="highlight">{}</span>"#, ANALYZING)
}

pub fn warning_markup(message: &str) -> String {
    format!(r#"<span class="warning">{}</span>"#, escape_html(message))
}

/// One hero terminal run: loading line, API call, then either a warning or
/// the truncated answer typed out.
pub async fn run_hero_demo<B, S, R>(
    backend: &B,
    query: &str,
    max_chars: usize,
    ticket: &Ticket,
    sink: &mut S,
    sleeper: &dyn Sleeper,
    rng: &mut R,
) -> HeroOutcome
where
    B: DemoBackend + ?Sized,
    S: RevealSink + ?Sized,
    R: rand::Rng,
{
    sink.show(&loading_markup());
    let result = backend.ask(query).await;
    if !ticket.is_current() {
        return HeroOutcome::Superseded;
    }

    match result {
        Err(DemoError::RateLimited) => {
            sink.show(&warning_markup(HERO_RATE_LIMITED));
            HeroOutcome::RateLimited
        }
        Err(e) => {
            tracing::warn!("API call failed: {}", e);
            sink.show(&warning_markup(API_UNAVAILABLE));
            HeroOutcome::Failed
        }
        Ok(answer) => {
            let display = truncate_for_display(&answer.answer, max_chars);
            sink.show("");
            let html = escape_html(&display.text);
            if reveal_markup(sink, &html, ticket, sleeper, rng).await {
                HeroOutcome::Revealed {
                    truncated: display.truncated,
                }
            } else {
                HeroOutcome::Superseded
            }
        }
    }
}

/// Query pushed into the terminal from outside, e.g. by a scenario tab.
/// `seq` makes repeated clicks on the same tab distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioRequest {
    pub seq: u32,
    pub query: String,
}

#[derive(Properties, PartialEq)]
pub struct HeroDemoProps {
    pub examples: &'static [DemoExample],
    pub pipeline: Callback<()>,
    #[prop_or_default]
    pub scenario: Option<ScenarioRequest>,
}

#[function_component(HeroDemo)]
pub fn hero_demo(props: &HeroDemoProps) -> Html {
    let config = use_context::<Config>().unwrap_or_default();
    let input = use_state(String::new);
    let output_ref = use_node_ref();
    let cursor_visible = use_state(|| true);
    let more_visible = use_state(|| false);
    let generation = use_state(Generation::default);
    let autorun = use_state(Generation::default);

    let run_demo = {
        let config = config.clone();
        let output_ref = output_ref.clone();
        let cursor_visible = cursor_visible.clone();
        let more_visible = more_visible.clone();
        let generation = (*generation).clone();
        let autorun = (*autorun).clone();
        let pipeline = props.pipeline.clone();
        Callback::from(move |query: String| {
            let query = query.trim().to_string();
            if query.is_empty() {
                return;
            }
            autorun.cancel();
            let ticket = generation.begin();
            pipeline.emit(());
            more_visible.set(false);
            cursor_visible.set(true);

            let backend = HttpDemoBackend::new(config.clone());
            let max_chars = config.hero_max_chars;
            let output_ref = output_ref.clone();
            let cursor_visible = cursor_visible.clone();
            let more_visible = more_visible.clone();
            spawn_local(async move {
                let mut sink = ElementSink::new(output_ref);
                let mut rng = rand::thread_rng();
                let outcome = run_hero_demo(
                    &backend,
                    &query,
                    max_chars,
                    &ticket,
                    &mut sink,
                    &GlooSleeper,
                    &mut rng,
                )
                .await;
                if outcome == HeroOutcome::Superseded {
                    return;
                }
                cursor_visible.set(false);
                if outcome == (HeroOutcome::Revealed { truncated: true }) {
                    more_visible.set(true);
                }
            });
        })
    };

    // Type the first example into the terminal shortly after load, then run it.
    {
        let examples = props.examples;
        let run_demo = run_demo.clone();
        let input = input.clone();
        let autorun = (*autorun).clone();
        let config = config.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(example) = examples.first() {
                    let ticket = autorun.begin();
                    let query = example.query;
                    spawn_local(async move {
                        GlooSleeper.sleep(config.autorun_delay_ms).await;
                        let speed = config.typing_speed_ms;
                        let typed = type_plain(query, speed, &ticket, &GlooSleeper, |frame| {
                            input.set(frame.to_string())
                        })
                        .await;
                        if !typed {
                            return;
                        }
                        GlooSleeper.sleep(config.autorun_pause_ms).await;
                        if ticket.is_current() {
                            run_demo.emit(query.to_string());
                        }
                    });
                }
                move || autorun.cancel()
            },
            (),
        );
    }

    {
        let input = input.clone();
        let run_demo = run_demo.clone();
        use_effect_with_deps(
            move |scenario: &Option<ScenarioRequest>| {
                if let Some(scenario) = scenario {
                    input.set(scenario.query.clone());
                    run_demo.emit(scenario.query.clone());
                }
                || ()
            },
            props.scenario.clone(),
        );
    }

    let oninput = {
        let input = input.clone();
        let autorun = (*autorun).clone();
        Callback::from(move |e: InputEvent| {
            autorun.cancel();
            input.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let onkeypress = {
        let input = input.clone();
        let run_demo = run_demo.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                run_demo.emit((*input).clone());
            }
        })
    };

    let on_more = {
        let offset = config.scroll_offset;
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            scroll_to_section("solution", offset);
        })
    };

    let cursor_style = if *cursor_visible { "display: inline-block" } else { "display: none" };

    html! {
        <div class="demo-terminal">
            <div class="demo-terminal-header">
                <span class="demo-dot red"></span>
                <span class="demo-dot yellow"></span>
                <span class="demo-dot green"></span>
                <span class="demo-terminal-title">{"codegraph"}</span>
            </div>
            <div class="demo-terminal-body">
                <div class="demo-input-line">
                    <span class="demo-prompt">{"$ "}</span>
                    <input
                        id="demo-input"
                        class="demo-input"
                        type="text"
                        placeholder="Спросите о своей кодовой базе..."
                        aria-label="Вопрос к CodeGraph"
                        value={(*input).clone()}
                        {oninput}
                        {onkeypress}
                    />
                </div>
                <div class="demo-output-line">
                    <div id="demo-output" class="demo-output" ref={output_ref} aria-live="polite"></div>
                    if *more_visible {
                        <a href="#solution" class="demo-more-link" onclick={on_more}>{MORE_LINK}</a>
                    }
                    <span class="demo-cursor" style={cursor_style}></span>
                </div>
            </div>
            <div class="demo-examples">
                { for props.examples.iter().map(|example| {
                    let run_demo = run_demo.clone();
                    let input = input.clone();
                    let query = example.query;
                    let onclick = Callback::from(move |_: MouseEvent| {
                        input.set(query.to_string());
                        run_demo.emit(query.to_string());
                    });
                    html! {
                        <button type="button" class="demo-example-btn" data-query={query} {onclick}>
                            {example.label}
                        </button>
                    }
                }) }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::api::DemoAnswer;
    use crate::demo::typing::testing::{InstantSleeper, RecordingSink};
    use crate::utils::api::RequestError;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct FakeBackend {
        result: Result<DemoAnswer, DemoError>,
        /// Starts a newer run while the request is "in flight".
        interrupt: Option<Generation>,
    }

    impl FakeBackend {
        fn answering(answer: &str) -> Self {
            Self {
                result: Ok(DemoAnswer {
                    answer: answer.to_string(),
                    processing_time_ms: Some(120.0),
                }),
                interrupt: None,
            }
        }

        fn failing(error: DemoError) -> Self {
            Self {
                result: Err(error),
                interrupt: None,
            }
        }
    }

    #[async_trait(?Send)]
    impl DemoBackend for FakeBackend {
        async fn ask(&self, _query: &str) -> Result<DemoAnswer, DemoError> {
            if let Some(generation) = &self.interrupt {
                generation.begin();
            }
            self.result.clone()
        }
    }

    fn run(backend: &FakeBackend, generation: &Generation) -> (HeroOutcome, Vec<String>) {
        let ticket = generation.begin();
        let mut sink = RecordingSink::default();
        let sleeper = InstantSleeper::default();
        let mut rng = StdRng::seed_from_u64(42);
        let outcome = block_on(run_hero_demo(
            backend,
            "What is a function?",
            300,
            &ticket,
            &mut sink,
            &sleeper,
            &mut rng,
        ));
        (outcome, sink.frames)
    }

    #[test]
    fn test_short_answer_is_escaped_and_typed_out() {
        let backend = FakeBackend::answering("A function is <fn> & more");
        let (outcome, frames) = run(&backend, &Generation::default());

        assert_eq!(outcome, HeroOutcome::Revealed { truncated: false });
        assert_eq!(frames[0], loading_markup());
        assert_eq!(frames[1], "");
        assert_eq!(frames.last().unwrap(), "A function is &lt;fn&gt; &amp; more");
        assert!(frames.iter().all(|f| !f.ends_with("&l") && !f.ends_with("&am")));
    }

    #[test]
    fn test_long_answer_is_truncated() {
        let answer = "граф ".repeat(100);
        let backend = FakeBackend::answering(&answer);
        let (outcome, frames) = run(&backend, &Generation::default());

        assert_eq!(outcome, HeroOutcome::Revealed { truncated: true });
        let last = frames.last().unwrap();
        assert!(last.ends_with("граф..."));
        assert!(last.chars().count() <= 303);
    }

    #[test]
    fn test_rate_limit_shows_only_rate_limit_warning() {
        let backend = FakeBackend::failing(DemoError::RateLimited);
        let (outcome, frames) = run(&backend, &Generation::default());

        assert_eq!(outcome, HeroOutcome::RateLimited);
        assert_eq!(frames.last().unwrap(), &warning_markup(HERO_RATE_LIMITED));
        assert!(frames.iter().all(|f| !f.contains(API_UNAVAILABLE)));
    }

    #[test]
    fn test_transport_failure_shows_generic_warning() {
        let backend = FakeBackend::failing(DemoError::Request(RequestError::Timeout(180_000)));
        let (outcome, frames) = run(&backend, &Generation::default());

        assert_eq!(outcome, HeroOutcome::Failed);
        assert_eq!(frames, vec![loading_markup(), warning_markup(API_UNAVAILABLE)]);
    }

    #[test]
    fn test_response_for_superseded_query_is_dropped() {
        let generation = Generation::default();
        let mut backend = FakeBackend::answering("stale");
        backend.interrupt = Some(generation.clone());
        let (outcome, frames) = run(&backend, &generation);

        assert_eq!(outcome, HeroOutcome::Superseded);
        assert_eq!(frames, vec![loading_markup()]);
    }
}
