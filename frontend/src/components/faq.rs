use std::collections::BTreeSet;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::utils::dom::{arrow_target, focus_element};

pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqEntry {
    pub category: &'static str,
    pub question: &'static str,
    pub answer: &'static str,
}

impl FaqEntry {
    /// Search and category filters combine; an empty search matches all.
    pub fn matches(&self, query: &str, category: &str) -> bool {
        let in_category = category == ALL_CATEGORIES || self.category == category;
        if !in_category {
            return false;
        }
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.question.to_lowercase().contains(&query)
            || self.answer.to_lowercase().contains(&query)
    }
}

#[derive(Properties, PartialEq)]
pub struct FaqProps {
    pub entries: &'static [FaqEntry],
    /// `(key, label)` pairs; the first is expected to be [`ALL_CATEGORIES`].
    pub categories: &'static [(&'static str, &'static str)],
}

#[function_component(Faq)]
pub fn faq(props: &FaqProps) -> Html {
    let open = use_state(BTreeSet::<usize>::new);
    let query = use_state(String::new);
    let category = use_state(|| ALL_CATEGORIES);

    let oninput = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            query.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let visible: Vec<usize> = props
        .entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.matches(&query, &category))
        .map(|(index, _)| index)
        .collect();

    html! {
        <div class="faq">
            <div class="faq-controls">
                <input
                    class="faq-search-input"
                    type="search"
                    placeholder="Поиск по вопросам..."
                    aria-label="Поиск по вопросам"
                    value={(*query).clone()}
                    {oninput}
                />
                <div class="faq-categories">
                    { for props.categories.iter().map(|(key, label)| {
                        let key = *key;
                        let onclick = {
                            let category = category.clone();
                            Callback::from(move |_: MouseEvent| category.set(key))
                        };
                        html! {
                            <button
                                type="button"
                                class={classes!("faq-category-btn", (*category == key).then_some("active"))}
                                data-category={key}
                                {onclick}
                            >
                                {*label}
                            </button>
                        }
                    }) }
                </div>
            </div>
            <div class="faq-list">
                { for visible.iter().enumerate().map(|(position, &index)| {
                    let entry = props.entries[index];
                    let is_open = open.contains(&index);
                    let toggle = {
                        let open = open.clone();
                        Callback::from(move |_: MouseEvent| {
                            let mut next = (*open).clone();
                            if !next.remove(&index) {
                                next.insert(index);
                            }
                            open.set(next);
                        })
                    };
                    let onkeydown = {
                        let visible = visible.clone();
                        Callback::from(move |e: KeyboardEvent| {
                            if let Some(next) = arrow_target(&e.key(), position, visible.len()) {
                                e.prevent_default();
                                focus_element(&format!("faq-question-{}", visible[next]));
                            }
                        })
                    };
                    html! {
                        <div class={classes!("faq-item", is_open.then_some("open"))} data-category={entry.category}>
                            <button
                                id={format!("faq-question-{}", index)}
                                type="button"
                                class="faq-question"
                                aria-expanded={is_open.to_string()}
                                aria-controls={format!("faq-answer-{}", index)}
                                onclick={toggle}
                                {onkeydown}
                            >
                                <span class="question-text">{entry.question}</span>
                                <span class="toggle-icon">{if is_open { "−" } else { "+" }}</span>
                            </button>
                            <div id={format!("faq-answer-{}", index)} class="faq-answer" role="region">
                                <p>{entry.answer}</p>
                            </div>
                        </div>
                    }
                }) }
                if visible.is_empty() {
                    <p class="faq-empty">{"Ничего не найдено"}</p>
                }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: FaqEntry = FaqEntry {
        category: "security",
        question: "Уходит ли код за периметр?",
        answer: "Нет, CodeGraph разворачивается on-premise.",
    };

    #[test]
    fn test_category_filter() {
        assert!(ENTRY.matches("", ALL_CATEGORIES));
        assert!(ENTRY.matches("", "security"));
        assert!(!ENTRY.matches("", "pricing"));
    }

    #[test]
    fn test_search_is_case_insensitive_over_question_and_answer() {
        assert!(ENTRY.matches("ПЕРИМЕТР", ALL_CATEGORIES));
        assert!(ENTRY.matches("on-premise", ALL_CATEGORIES));
        assert!(!ENTRY.matches("kubernetes", ALL_CATEGORIES));
    }

    #[test]
    fn test_search_and_category_combine() {
        assert!(!ENTRY.matches("периметр", "pricing"));
        assert!(ENTRY.matches("  периметр ", "security"));
    }
}
