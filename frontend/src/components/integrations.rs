use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationStatus {
    Available,
    Beta,
    Planned,
}

impl IntegrationStatus {
    pub fn key(self) -> &'static str {
        match self {
            IntegrationStatus::Available => "available",
            IntegrationStatus::Beta => "beta",
            IntegrationStatus::Planned => "planned",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IntegrationStatus::Available => "Доступно",
            IntegrationStatus::Beta => "Бета",
            IntegrationStatus::Planned => "В планах",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Integration {
    pub name: &'static str,
    pub description: &'static str,
    pub status: IntegrationStatus,
}

/// `None` shows every card.
pub fn integration_visible(integration: &Integration, filter: Option<IntegrationStatus>) -> bool {
    filter.map_or(true, |status| integration.status == status)
}

const FILTERS: [(Option<IntegrationStatus>, &str); 4] = [
    (None, "Все"),
    (Some(IntegrationStatus::Available), "Доступно"),
    (Some(IntegrationStatus::Beta), "Бета"),
    (Some(IntegrationStatus::Planned), "В планах"),
];

#[derive(Properties, PartialEq)]
pub struct IntegrationsProps {
    pub integrations: &'static [Integration],
}

#[function_component(Integrations)]
pub fn integrations(props: &IntegrationsProps) -> Html {
    let filter = use_state(|| None::<IntegrationStatus>);

    html! {
        <div class="integrations">
            <div class="integration-filters">
                { for FILTERS.iter().map(|(status, label)| {
                    let status = *status;
                    let onclick = {
                        let filter = filter.clone();
                        Callback::from(move |_: MouseEvent| filter.set(status))
                    };
                    html! {
                        <button
                            type="button"
                            class={classes!("integration-filter-btn", (*filter == status).then_some("active"))}
                            data-filter={status.map_or("all", IntegrationStatus::key)}
                            {onclick}
                        >
                            {*label}
                        </button>
                    }
                }) }
            </div>
            <div class="integration-grid">
                { for props.integrations.iter()
                    .filter(|integration| integration_visible(integration, *filter))
                    .map(|integration| html! {
                        <div class="integration-card" data-status={integration.status.key()}>
                            <h4>{integration.name}</h4>
                            <p>{integration.description}</p>
                            <span class={classes!("integration-status", integration.status.key())}>
                                {integration.status.label()}
                            </span>
                        </div>
                    }) }
            </div>
        </div>
    }
}
