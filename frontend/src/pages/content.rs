//! Copy and canned data rendered by the landing page.

use crate::components::faq::FaqEntry;
use crate::components::header::NavLink;
use crate::components::integrations::{Integration, IntegrationStatus};
use crate::components::stats::{QualityMetric, Stat};
use crate::components::tabs::Feature;
use crate::demo::DemoExample;

pub const NAV_LINKS: &[NavLink] = &[
    NavLink {
        href: "#features",
        label: "Возможности",
    },
    NavLink {
        href: "#solution",
        label: "Решение",
    },
    NavLink {
        href: "#integrations",
        label: "Интеграции",
    },
    NavLink {
        href: "#faq",
        label: "FAQ",
    },
    NavLink {
        href: "#contact",
        label: "Демо",
    },
];

pub const HERO_EXAMPLES: &[DemoExample] = &[
    DemoExample {
        label: "Что такое функция?",
        query: "What is a function?",
    },
    DemoExample {
        label: "Где проверяется авторизация?",
        query: "Где в коде проверяется авторизация пользователя?",
    },
    DemoExample {
        label: "Кто вызывает save_order?",
        query: "Какие функции вызывают save_order?",
    },
];

pub const SCENARIOS: &[DemoExample] = &[
    DemoExample {
        label: "Онбординг",
        query: "Опиши архитектуру модуля платежей для нового разработчика",
    },
    DemoExample {
        label: "Code review",
        query: "Какие места затронет изменение сигнатуры calculate_discount?",
    },
    DemoExample {
        label: "Безопасность",
        query: "Найди SQL-запросы, собираемые конкатенацией строк",
    },
    DemoExample {
        label: "Миграция",
        query: "Какие сервисы используют устаревший клиент Redis?",
    },
];

pub const SOLUTION_EXAMPLES: &[DemoExample] = &[
    DemoExample {
        label: "Граф вызовов",
        query: "Построй граф вызовов для process_payment",
    },
    DemoExample {
        label: "Мёртвый код",
        query: "Какие публичные функции нигде не используются?",
    },
    DemoExample {
        label: "Зависимости",
        query: "От каких внешних библиотек зависит модуль отчётов?",
    },
];

pub const PIPELINE_STEPS: &[&str] = &[
    "Разбор вопроса",
    "Поиск по графу кода",
    "Сбор контекста",
    "Генерация ответа",
    "Проверка ссылок",
];

pub const STATS: &[Stat] = &[
    Stat {
        value: 50,
        prefix: "",
        suffix: "+",
        label: "языков и диалектов",
    },
    Stat {
        value: 10,
        prefix: "",
        suffix: "M",
        label: "строк кода в одном графе",
    },
    Stat {
        value: 95,
        prefix: "",
        suffix: "%",
        label: "точность ссылок на код",
    },
    Stat {
        value: 3,
        prefix: "×",
        suffix: "",
        label: "быстрее онбординг",
    },
];

pub const QUALITY_METRICS: &[QualityMetric] = &[
    QualityMetric {
        label: "Точность ответов",
        progress: 92,
    },
    QualityMetric {
        label: "Полнота контекста",
        progress: 88,
    },
    QualityMetric {
        label: "Корректность ссылок",
        progress: 97,
    },
];

pub const FEATURES: &[Feature] = &[
    Feature {
        id: "graph",
        title: "Граф кода",
        summary: "Единая модель вызовов, типов и зависимостей по всем репозиториям.",
        points: &[
            "Инкрементальная индексация при каждом коммите",
            "Межъязыковые связи: сервисы, очереди, SQL",
            "История изменений для каждого узла",
        ],
    },
    Feature {
        id: "assistant",
        title: "Ассистент",
        summary: "Ответы на вопросы о коде со ссылками на конкретные строки.",
        points: &[
            "Понимает вопросы на русском и английском",
            "Показывает цепочку рассуждений по графу",
            "Работает с локальными LLM",
        ],
    },
    Feature {
        id: "security",
        title: "Безопасность",
        summary: "Разворачивается внутри контура, код никуда не уходит.",
        points: &[
            "On-premise установка",
            "Ролевая модель доступа к репозиториям",
            "Журнал всех запросов",
        ],
    },
];

pub const FAQ_CATEGORIES: &[(&str, &str)] = &[
    ("all", "Все"),
    ("general", "Общее"),
    ("security", "Безопасность"),
    ("pricing", "Стоимость"),
];

pub const FAQ_ENTRIES: &[FaqEntry] = &[
    FaqEntry {
        category: "general",
        question: "Какие языки поддерживаются?",
        answer: "Python, Java, Go, C#, JavaScript/TypeScript, C/C++ и SQL. Новые языки добавляются через плагины парсеров.",
    },
    FaqEntry {
        category: "general",
        question: "Сколько времени занимает индексация?",
        answer: "Репозиторий на миллион строк индексируется за 10–20 минут, дальше граф обновляется инкрементально.",
    },
    FaqEntry {
        category: "security",
        question: "Уходит ли наш код за периметр?",
        answer: "Нет. CodeGraph устанавливается on-premise и может работать с локальными моделями без доступа в интернет.",
    },
    FaqEntry {
        category: "security",
        question: "Как разграничивается доступ?",
        answer: "Права наследуются из GitLab или Bitbucket: пользователь видит только те репозитории, к которым у него есть доступ.",
    },
    FaqEntry {
        category: "pricing",
        question: "Как считается стоимость?",
        answer: "Лицензия зависит от числа разработчиков. Пилот на одном проекте бесплатный.",
    },
];

pub const INTEGRATIONS: &[Integration] = &[
    Integration {
        name: "GitLab",
        description: "Индексация репозиториев и merge request'ов",
        status: IntegrationStatus::Available,
    },
    Integration {
        name: "Bitbucket",
        description: "Синхронизация прав доступа",
        status: IntegrationStatus::Available,
    },
    Integration {
        name: "Jira",
        description: "Связь задач с изменениями в графе",
        status: IntegrationStatus::Beta,
    },
    Integration {
        name: "VS Code",
        description: "Вопросы к графу прямо из редактора",
        status: IntegrationStatus::Beta,
    },
    Integration {
        name: "JetBrains IDE",
        description: "Плагин для IntelliJ-платформы",
        status: IntegrationStatus::Planned,
    },
    Integration {
        name: "Confluence",
        description: "Генерация документации по графу",
        status: IntegrationStatus::Planned,
    },
];
