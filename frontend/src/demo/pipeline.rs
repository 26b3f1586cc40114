use gloo_timers::callback::Timeout;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineAction {
    Reset,
    /// Light step `i` and switch off step `i - 1`.
    Activate(usize),
    /// Re-light the final step once the sequence has run.
    HoldLast,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineState {
    active: Vec<bool>,
}

impl PipelineState {
    pub fn new(steps: usize) -> Self {
        Self {
            active: vec![false; steps],
        }
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active.get(index).copied().unwrap_or(false)
    }

    pub fn active_steps(&self) -> Vec<usize> {
        self.active
            .iter()
            .enumerate()
            .filter_map(|(i, on)| on.then_some(i))
            .collect()
    }

    fn apply(&mut self, action: PipelineAction) {
        match action {
            PipelineAction::Reset => self.active.iter_mut().for_each(|on| *on = false),
            PipelineAction::Activate(index) => {
                if index >= self.active.len() {
                    return;
                }
                if index > 0 {
                    self.active[index - 1] = false;
                }
                self.active[index] = true;
            }
            PipelineAction::HoldLast => {
                if let Some(last) = self.active.last_mut() {
                    *last = true;
                }
            }
        }
    }
}

impl Reducible for PipelineState {
    type Action = PipelineAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

/// Timeline of one pipeline run, in milliseconds from invocation. Offsets
/// saturate at `u32::MAX` when the configured step time is oversized.
pub fn pipeline_schedule(steps: usize, step_ms: u32) -> Vec<(u32, PipelineAction)> {
    if steps == 0 {
        return Vec::new();
    }
    let offset = |i: usize| u32::try_from(i).unwrap_or(u32::MAX).saturating_mul(step_ms);
    let mut schedule: Vec<(u32, PipelineAction)> = (0..steps)
        .map(|i| (offset(i), PipelineAction::Activate(i)))
        .collect();
    schedule.push((offset(steps), PipelineAction::HoldLast));
    schedule
}

#[derive(Clone)]
pub struct UsePipelineHandle {
    pub state: UseReducerHandle<PipelineState>,
    pub animate: Callback<()>,
}

/// Drives the pipeline indicator. Calling `animate` again while a run is in
/// flight drops that run's pending timers before starting over.
#[hook]
pub fn use_pipeline(steps: usize, step_ms: u32) -> UsePipelineHandle {
    let state = use_reducer(|| PipelineState::new(steps));
    let timers = use_mut_ref(Vec::<Timeout>::new);

    {
        let timers = timers.clone();
        use_effect_with_deps(
            move |_| move || timers.borrow_mut().clear(),
            (),
        );
    }

    let animate = {
        let state = state.clone();
        let timers = timers.clone();
        Callback::from(move |_: ()| {
            if steps == 0 {
                return;
            }
            let mut pending = timers.borrow_mut();
            pending.clear();
            state.dispatch(PipelineAction::Reset);
            for (at, action) in pipeline_schedule(steps, step_ms) {
                let state = state.clone();
                pending.push(Timeout::new(at, move || state.dispatch(action)));
            }
        })
    };

    UsePipelineHandle { state, animate }
}

#[derive(Properties, PartialEq)]
pub struct PipelineStepsProps {
    pub labels: &'static [&'static str],
    pub state: PipelineState,
}

#[function_component(PipelineSteps)]
pub fn pipeline_steps(props: &PipelineStepsProps) -> Html {
    html! {
        <div class="pipeline" aria-hidden="true">
            { for props.labels.iter().enumerate().map(|(i, label)| html! {
                <div class={classes!("pipeline-step", props.state.is_active(i).then_some("active"))}>
                    <span class="pipeline-step-index">{ i + 1 }</span>
                    <span class="pipeline-step-label">{ *label }</span>
                </div>
            }) }
        </div>
    }
}
