use yew::prelude::*;

use super::content::{
    FAQ_CATEGORIES, FAQ_ENTRIES, FEATURES, HERO_EXAMPLES, INTEGRATIONS, NAV_LINKS, PIPELINE_STEPS,
    QUALITY_METRICS, SCENARIOS, SOLUTION_EXAMPLES, STATS,
};
use crate::components::faq::Faq;
use crate::components::header::Header;
use crate::components::in_view::AnimateOnView;
use crate::components::integrations::Integrations;
use crate::components::stats::{Counter, QualityBar};
use crate::components::tabs::{FeatureTabs, TabStrip};
use crate::config::Config;
use crate::demo::hero::{HeroDemo, ScenarioRequest};
use crate::demo::pipeline::{use_pipeline, PipelineSteps};
use crate::demo::solution::SolutionDemo;
use crate::leads::form::LeadForm;

#[function_component(Landing)]
pub fn landing() -> Html {
    let config = use_context::<Config>().unwrap_or_default();
    let pipeline = use_pipeline(PIPELINE_STEPS.len(), config.pipeline_step_ms);
    let scenario = use_state(|| None::<ScenarioRequest>);
    let scenario_seq = use_mut_ref(|| 0u32);
    let active_scenario = use_state(|| None::<usize>);

    let on_scenario = {
        let scenario = scenario.clone();
        let active_scenario = active_scenario.clone();
        Callback::from(move |index: usize| {
            let Some(example) = SCENARIOS.get(index) else { return };
            let seq = {
                let mut next = scenario_seq.borrow_mut();
                *next += 1;
                *next
            };
            active_scenario.set(Some(index));
            scenario.set(Some(ScenarioRequest {
                seq,
                query: example.query.to_string(),
            }));
        })
    };

    let landing_css = r#"
        .demo-terminal {
            background: #0d1117;
            border-radius: 12px;
            font-family: "JetBrains Mono", monospace;
            color: #e6edf3;
            overflow: hidden;
        }
        .demo-terminal-body {
            padding: 1rem 1.25rem;
            min-height: 220px;
            max-height: 320px;
            overflow-y: auto;
        }
        .demo-output {
            display: inline;
            white-space: pre-wrap;
        }
        .demo-output .highlight { color: #7ee787; }
        .demo-output .warning, .result-error .warning { color: #f0883e; }
        .demo-cursor {
            width: 8px;
            height: 1.1em;
            background: #e6edf3;
            vertical-align: text-bottom;
            animation: blink 1s step-end infinite;
        }
        @keyframes blink { 50% { opacity: 0; } }
        .pipeline-step { opacity: 0.4; transition: opacity 0.3s ease; }
        .pipeline-step.active { opacity: 1; }
        .result-content pre { white-space: pre-wrap; }
        .processing-time { color: #8b949e; font-size: 0.85em; }
    "#;

    html! {
        <div class="landing-page">
            <style>{landing_css}</style>
            <Header links={NAV_LINKS} />

            <section id="hero" class="hero">
                <div class="hero-content">
                    <h1 class="hero-title">{"Спросите свой код"}</h1>
                    <p class="hero-subtitle">
                        {"CodeGraph строит граф всей кодовой базы и отвечает на вопросы о ней со ссылками на конкретные строки."}
                    </p>
                    <div class="hero-cta-group">
                        <a href="#contact" class="btn btn-primary">{"Запросить демо"}</a>
                        <a href="#solution" class="btn btn-secondary">{"Как это работает"}</a>
                    </div>
                </div>
                <HeroDemo
                    examples={HERO_EXAMPLES}
                    pipeline={pipeline.animate.clone()}
                    scenario={(*scenario).clone()}
                />
                <div class="scenario-tabs">
                    <TabStrip
                        id_prefix="scenario-tab"
                        tab_class="scenario-tab"
                        labels={SCENARIOS.iter().map(|s| s.label).collect::<Vec<_>>()}
                        active={*active_scenario}
                        on_select={on_scenario}
                    />
                </div>
            </section>

            <section id="stats" class="stats">
                { for STATS.iter().map(|stat| html! { <Counter stat={*stat} /> }) }
            </section>

            <section id="features" class="features">
                <AnimateOnView animation="fade-up">
                    <h2>{"Возможности"}</h2>
                    <FeatureTabs features={FEATURES} />
                </AnimateOnView>
            </section>

            <section id="solution" class="solution">
                <AnimateOnView animation="fade-up">
                    <h2>{"Задайте вопрос о коде"}</h2>
                    <p>{"Каждый запрос проходит через конвейер: от разбора вопроса до проверки ссылок на исходный код."}</p>
                </AnimateOnView>
                <PipelineSteps labels={PIPELINE_STEPS} state={(*pipeline.state).clone()} />
                <SolutionDemo examples={SOLUTION_EXAMPLES} pipeline={pipeline.animate.clone()} />
            </section>

            <section id="quality" class="quality">
                <h2>{"Качество ответов"}</h2>
                { for QUALITY_METRICS.iter().map(|metric| html! { <QualityBar metric={*metric} /> }) }
            </section>

            <section id="integrations" class="integrations-section">
                <AnimateOnView animation="fade-up">
                    <h2>{"Интеграции"}</h2>
                </AnimateOnView>
                <Integrations integrations={INTEGRATIONS} />
            </section>

            <section id="faq" class="faq-section">
                <h2>{"Частые вопросы"}</h2>
                <Faq entries={FAQ_ENTRIES} categories={FAQ_CATEGORIES} />
            </section>

            <section id="contact" class="contact">
                <AnimateOnView animation="fade-up">
                    <h2>{"Запросите демо на своём коде"}</h2>
                    <p>{"Оставьте контакты, и мы подготовим пилот на одном из ваших репозиториев."}</p>
                </AnimateOnView>
                <LeadForm />
            </section>

            <footer class="footer">
                <p>{"© CodeGraph"}</p>
            </footer>
        </div>
    }
}
