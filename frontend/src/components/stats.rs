use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::in_view::use_in_view;
use crate::config::Config;

const FRAME_MS: u32 = 16;

pub fn ease_out_cubic(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(3)
}

/// Counter reading `elapsed_ms` into an animation of `duration_ms`.
pub fn counter_value(target: i64, elapsed_ms: f64, duration_ms: f64) -> i64 {
    if duration_ms <= 0.0 {
        return target;
    }
    let progress = (elapsed_ms / duration_ms).clamp(0.0, 1.0);
    if progress >= 1.0 {
        return target;
    }
    (ease_out_cubic(progress) * target as f64).floor() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    pub value: i64,
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub label: &'static str,
}

#[derive(Properties, PartialEq)]
pub struct CounterProps {
    pub stat: Stat,
}

#[function_component(Counter)]
pub fn counter(props: &CounterProps) -> Html {
    let config = use_context::<Config>().unwrap_or_default();
    let node = use_node_ref();
    let visible = use_in_view(node.clone(), config.observer_threshold, "0px");
    let shown = use_state(|| 0i64);

    {
        let shown = shown.clone();
        let target = props.stat.value;
        let duration = f64::from(config.counter_duration_ms);
        use_effect_with_deps(
            move |visible: &bool| {
                if *visible {
                    spawn_local(async move {
                        let start = js_sys::Date::now();
                        loop {
                            let elapsed = js_sys::Date::now() - start;
                            let value = counter_value(target, elapsed, duration);
                            shown.set(value);
                            if value == target {
                                break;
                            }
                            TimeoutFuture::new(FRAME_MS).await;
                        }
                    });
                }
                || ()
            },
            visible,
        );
    }

    let stat = props.stat;
    html! {
        <div class="stat-card" ref={node}>
            <div class="stat-value">{format!("{}{}{}", stat.prefix, *shown, stat.suffix)}</div>
            <div class="stat-label">{stat.label}</div>
        </div>
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityMetric {
    pub label: &'static str,
    pub progress: u8,
}

#[derive(Properties, PartialEq)]
pub struct QualityBarProps {
    pub metric: QualityMetric,
}

/// Bar whose fill grows to `progress`% once scrolled into view.
#[function_component(QualityBar)]
pub fn quality_bar(props: &QualityBarProps) -> Html {
    let config = use_context::<Config>().unwrap_or_default();
    let node = use_node_ref();
    let visible = use_in_view(node.clone(), config.observer_threshold, "0px");
    let metric = props.metric;
    let width = if visible { metric.progress.min(100) } else { 0 };

    html! {
        <div class="quality-metric">
            <div class="quality-metric-header">
                <span>{metric.label}</span>
                <span class="quality-metric-value">{format!("{}%", metric.progress)}</span>
            </div>
            <div class="quality-metric-bar">
                <div
                    ref={node}
                    class="quality-metric-bar-fill"
                    data-progress={metric.progress.to_string()}
                    style={format!("width: {}%", width)}
                ></div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic() {
        assert!((ease_out_cubic(0.0) - 0.0).abs() < 0.001);
        assert!((ease_out_cubic(1.0) - 1.0).abs() < 0.001);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn test_counter_value_progression() {
        assert_eq!(counter_value(1000, 0.0, 2000.0), 0);
        assert_eq!(counter_value(1000, 1000.0, 2000.0), 875);
        assert_eq!(counter_value(1000, 2000.0, 2000.0), 1000);
        assert_eq!(counter_value(1000, 5000.0, 2000.0), 1000);
        assert_eq!(counter_value(42, 10.0, 0.0), 42);
    }

    #[test]
    fn test_counter_is_monotonic() {
        let mut last = 0;
        for t in (0..=2000).step_by(16) {
            let v = counter_value(500, t as f64, 2000.0);
            assert!(v >= last);
            last = v;
        }
    }
}
