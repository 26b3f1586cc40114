//! Progressive "typing" reveal of demo answers.
//!
//! Two flavours share one shape: plain text goes out one character per
//! fixed tick, markup goes out one visible unit per randomized tick with
//! tags and character entities emitted whole. Both stop as soon as their
//! [`Ticket`] is superseded and report completion only when every unit
//! has been written.

use futures::future::LocalBoxFuture;
use gloo_timers::future::TimeoutFuture;
use rand::Rng;
use yew::NodeRef;

use crate::utils::generation::Ticket;

pub const NEWLINE_DELAY_MS: u32 = 100;
pub const MIN_CHAR_DELAY_MS: u32 = 10;
pub const MAX_CHAR_DELAY_MS: u32 = 30;

/// Longest entity we treat as one unit, `&` and `;` included.
const MAX_ENTITY_LEN: usize = 10;

pub trait Sleeper {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()>;
}

/// Browser timers.
pub struct GlooSleeper;

impl Sleeper for GlooSleeper {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        Box::pin(TimeoutFuture::new(ms))
    }
}

/// Where revealed markup is written. Each call replaces the whole content.
pub trait RevealSink {
    fn show(&mut self, html: &str);
}

/// Writes into the element behind a `NodeRef` via `innerHTML`.
pub struct ElementSink {
    node: NodeRef,
}

impl ElementSink {
    pub fn new(node: NodeRef) -> Self {
        Self { node }
    }
}

impl RevealSink for ElementSink {
    fn show(&mut self, html: &str) {
        if let Some(element) = self.node.cast::<web_sys::Element>() {
            element.set_inner_html(html);
        }
    }
}

/// Walks a markup string one visible unit at a time.
///
/// Yields byte offsets; every offset lies on a unit boundary, so the prefix
/// `&source[..offset]` never ends inside a tag or an entity.
pub struct MarkupCursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> MarkupCursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    fn unit_len(&self) -> usize {
        let rest = &self.source[self.pos..];
        let first = match rest.chars().next() {
            Some(c) => c,
            None => return 0,
        };
        match first {
            '<' => match rest.find('>') {
                Some(close) => close + 1,
                None => first.len_utf8(),
            },
            '&' => entity_len(rest).unwrap_or(1),
            c => c.len_utf8(),
        }
    }
}

impl<'a> Iterator for MarkupCursor<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.pos >= self.source.len() {
            return None;
        }
        self.pos += self.unit_len();
        Some(self.pos)
    }
}

/// Length of a `&name;` / `&#123;` entity at the start of `s`.
fn entity_len(s: &str) -> Option<usize> {
    let end = s.char_indices().skip(1).take(MAX_ENTITY_LEN - 1).find_map(|(i, c)| match c {
        ';' => Some(Some(i)),
        c if c.is_ascii_alphanumeric() || c == '#' => None,
        _ => Some(None),
    })??;
    (end > 1).then_some(end + 1)
}

/// Pause after writing a unit ending in `last`: a beat on line breaks,
/// otherwise a short random jitter.
pub fn step_delay<R: Rng>(last: Option<char>, rng: &mut R) -> u32 {
    match last {
        Some('\n') => NEWLINE_DELAY_MS,
        _ => rng.gen_range(MIN_CHAR_DELAY_MS..MAX_CHAR_DELAY_MS),
    }
}

/// Reveals `html` into `sink` unit by unit. Returns `true` once everything
/// has been written, `false` if a newer run took over the target.
pub async fn reveal_markup<S, R>(
    sink: &mut S,
    html: &str,
    ticket: &Ticket,
    sleeper: &dyn Sleeper,
    rng: &mut R,
) -> bool
where
    S: RevealSink + ?Sized,
    R: Rng,
{
    for end in MarkupCursor::new(html) {
        if !ticket.is_current() {
            return false;
        }
        sink.show(&html[..end]);
        let delay = step_delay(html[..end].chars().last(), rng);
        sleeper.sleep(delay).await;
    }
    ticket.is_current()
}

/// Types `text` one character per `speed_ms`, handing each growing prefix to
/// `on_frame`. Same completion contract as [`reveal_markup`].
pub async fn type_plain<F>(
    text: &str,
    speed_ms: u32,
    ticket: &Ticket,
    sleeper: &dyn Sleeper,
    mut on_frame: F,
) -> bool
where
    F: FnMut(&str),
{
    if !ticket.is_current() {
        return false;
    }
    on_frame("");
    for (idx, c) in text.char_indices() {
        if !ticket.is_current() {
            return false;
        }
        on_frame(&text[..idx + c.len_utf8()]);
        sleeper.sleep(speed_ms).await;
    }
    ticket.is_current()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Resolves immediately and records every requested delay.
    #[derive(Default, Clone)]
    pub struct InstantSleeper {
        pub delays: Rc<RefCell<Vec<u32>>>,
    }

    impl Sleeper for InstantSleeper {
        fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
            self.delays.borrow_mut().push(ms);
            Box::pin(futures::future::ready(()))
        }
    }

    #[derive(Default)]
    pub struct RecordingSink {
        pub frames: Vec<String>,
    }

    impl RevealSink for RecordingSink {
        fn show(&mut self, html: &str) {
            self.frames.push(html.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{InstantSleeper, RecordingSink};
    use super::*;
    use crate::utils::generation::Generation;
    use futures::executor::block_on;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn has_open_tag(frame: &str) -> bool {
        frame.rfind('<').map_or(false, |lt| frame[lt..].find('>').is_none())
    }

    #[test]
    fn test_cursor_consumes_tags_whole() {
        let html = "<span>x</span>y";
        let stops: Vec<&str> = MarkupCursor::new(html).map(|end| &html[..end]).collect();
        assert_eq!(stops, vec!["<span>", "<span>x", "<span>x</span>", "<span>x</span>y"]);
    }

    #[test]
    fn test_cursor_consumes_entities_whole() {
        let html = "a&lt;b&#39;";
        let stops: Vec<&str> = MarkupCursor::new(html).map(|end| &html[..end]).collect();
        assert_eq!(stops, vec!["a", "a&lt;", "a&lt;b", "a&lt;b&#39;"]);
    }

    #[test]
    fn test_cursor_advances_past_unclosed_tag() {
        let html = "a<b";
        let stops: Vec<usize> = MarkupCursor::new(html).collect();
        assert_eq!(stops, vec![1, 2, 3]);
    }

    #[test]
    fn test_cursor_treats_bare_ampersand_as_text() {
        let html = "R&D team";
        let stops: Vec<&str> = MarkupCursor::new(html).map(|end| &html[..end]).collect();
        assert_eq!(stops[1], "R&");
        assert_eq!(stops.len(), html.len());
    }

    #[test]
    fn test_cursor_handles_multibyte_text() {
        let html = "Граф";
        let stops: Vec<&str> = MarkupCursor::new(html).map(|end| &html[..end]).collect();
        assert_eq!(stops, vec!["Г", "Гр", "Гра", "Граф"]);
    }

    #[test]
    fn test_step_delay_band() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(step_delay(Some('\n'), &mut rng), NEWLINE_DELAY_MS);
        for _ in 0..200 {
            let d = step_delay(Some('a'), &mut rng);
            assert!((MIN_CHAR_DELAY_MS..MAX_CHAR_DELAY_MS).contains(&d));
        }
    }

    #[test]
    fn test_reveal_never_shows_half_tag() {
        let generation = Generation::default();
        let ticket = generation.begin();
        let mut sink = RecordingSink::default();
        let sleeper = InstantSleeper::default();
        let mut rng = StdRng::seed_from_u64(1);

        let html = "<span class=\"highlight\">x</span>y<br>z";
        let done = block_on(reveal_markup(&mut sink, html, &ticket, &sleeper, &mut rng));

        assert!(done);
        assert_eq!(sink.frames.last().map(String::as_str), Some(html));
        assert!(sink.frames.iter().all(|f| !has_open_tag(f)));
        assert!(sink.frames.windows(2).all(|w| w[1].starts_with(w[0].as_str())));
    }

    #[test]
    fn test_reveal_pauses_after_newline() {
        let generation = Generation::default();
        let ticket = generation.begin();
        let mut sink = RecordingSink::default();
        let sleeper = InstantSleeper::default();
        let mut rng = StdRng::seed_from_u64(3);

        block_on(reveal_markup(&mut sink, "a\nb", &ticket, &sleeper, &mut rng));
        let delays = sleeper.delays.borrow();
        assert_eq!(delays.len(), 3);
        assert_eq!(delays[1], NEWLINE_DELAY_MS);
        assert!(delays[0] < MAX_CHAR_DELAY_MS && delays[2] < MAX_CHAR_DELAY_MS);
    }

    /// Sink that starts a newer run after a few frames, like a second submit
    /// landing mid-reveal.
    struct HijackingSink {
        generation: Generation,
        frames: Vec<String>,
        hijack_after: usize,
    }

    impl RevealSink for HijackingSink {
        fn show(&mut self, html: &str) {
            self.frames.push(html.to_string());
            if self.frames.len() == self.hijack_after {
                self.generation.begin();
            }
        }
    }

    #[test]
    fn test_superseded_reveal_stops_writing() {
        let generation = Generation::default();
        let ticket = generation.begin();
        let mut sink = HijackingSink {
            generation: generation.clone(),
            frames: Vec::new(),
            hijack_after: 2,
        };
        let sleeper = InstantSleeper::default();
        let mut rng = StdRng::seed_from_u64(5);

        let done = block_on(reveal_markup(&mut sink, "stale answer", &ticket, &sleeper, &mut rng));
        assert!(!done);
        assert_eq!(sink.frames, vec!["s", "st"]);
    }

    #[test]
    fn test_empty_reveal_completes_without_writes() {
        let generation = Generation::default();
        let ticket = generation.begin();
        let mut sink = RecordingSink::default();
        let sleeper = InstantSleeper::default();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(block_on(reveal_markup(&mut sink, "", &ticket, &sleeper, &mut rng)));
        assert!(sink.frames.is_empty());
    }

    #[test]
    fn test_type_plain_frames_and_speed() {
        let generation = Generation::default();
        let ticket = generation.begin();
        let sleeper = InstantSleeper::default();
        let mut frames = Vec::new();

        let done = block_on(type_plain("Что?", 50, &ticket, &sleeper, |f| {
            frames.push(f.to_string())
        }));
        assert!(done);
        assert_eq!(frames, vec!["", "Ч", "Чт", "Что", "Что?"]);
        assert!(sleeper.delays.borrow().iter().all(|d| *d == 50));
    }

    #[test]
    fn test_type_plain_with_stale_ticket_writes_nothing() {
        let generation = Generation::default();
        let ticket = generation.begin();
        generation.begin();
        let sleeper = InstantSleeper::default();
        let mut frames = Vec::new();

        let done = block_on(type_plain("abc", 50, &ticket, &sleeper, |f| {
            frames.push(f.to_string())
        }));
        assert!(!done);
        assert!(frames.is_empty());
    }
}
