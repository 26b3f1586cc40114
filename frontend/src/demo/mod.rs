pub mod api;
pub mod hero;
pub mod pipeline;
pub mod solution;
pub mod typing;

pub const ANALYZING: &str = "Анализирую...";
pub const API_UNAVAILABLE: &str = "API недоступен. Попробуйте позже.";
pub const HERO_RATE_LIMITED: &str = "Превышен лимит запросов. Подождите минуту.";
pub const SOLUTION_RATE_LIMITED: &str = "Превышен лимит запросов (30/мин)";
pub const SOLUTION_RATE_LIMIT_HINT: &str = "Пожалуйста, подождите минуту и попробуйте снова.";
pub const MORE_LINK: &str = " Подробнее →";

/// Canned query offered as a one-click example next to a demo input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoExample {
    pub label: &'static str,
    pub query: &'static str,
}
