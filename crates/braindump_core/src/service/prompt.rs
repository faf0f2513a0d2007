//! Assistant prompt composition and launch.
//!
//! # Invariants
//! - Blank note text never produces a prompt or a launch.
//! - The composed prompt is percent-encoded into `ASSISTANT_BASE_URL`.

use crate::model::note::NoteType;
use log::info;

/// Base address the encoded prompt is appended to.
pub const ASSISTANT_BASE_URL: &str = "https://claude.ai/new?q=";

const BRAINDUMP_PREAMBLE: &str = concat!(
    "below is my journal entry. wyt? talk through it with me like a friend. ",
    "don't therpaize me and give me a whole breakdown, don't repeat my thoughts with headings. ",
    "really take all of this, and tell me back stuff truly as if you're an old homie. ",
    "Keep it casual, dont say yo, help me make new connections i don't see, comfort, validate, challenge, all of it. ",
    "dont be afraid to say a lot. format with markdown headings if needed. ",
    "do not just go through every single thing i say, and say it back to me. ",
    "you need to proccess everythikng is say, make connections i don't see it, and deliver it all back to me as a story that makes me feel what you think i wanna feel. ",
    "thats what the best therapists do. ",
    "ideally, you're style/tone should sound like the user themselves. ",
    "it's as if the user is hearing their own tone but it should still feel different, because you have different things to say and don't just repeat back they say. ",
    "else, start by saying, \"hey, thanks for showing me this. my thoughts:\" my entry: ",
);

const IDEA_PREAMBLE: &str = r#"Hey — thanks for trusting me with this idea. Start by pasting your raw idea (one paragraph or a few bullets) after this message. Don't worry about neatness. I'll do the heavy lifting.

How to behave: Be an old homie who knows product & startup basics but talks like the user — casual, blunt, validating, a little provocative when needed. Don't act like a therapist. Don't repeat back the idea line-by-line. Don't ask for clarification before giving value — make sensible guesses and surface them clearly.

Goal: Turn the raw idea into a warm, structured framework that helps the creator (me) see the clearest path forward: the problem, customers, core solution (MVP), business model, risks, key experiments to run in the next 30/90 days, and a simple roadmap. Also give me the language I can use to explain the idea to partners/investors/users (one-liners and 30-second pitch), plus 3 tactical next actions I can do tomorrow. Be honest about weaknesses and where I'm over-optimistic.

Output format & sections (use these headings exactly):

opening (friend energy) — 2–4 sentences: a warm reaction that validates and teases; don't repeat the idea verbatim.

core insight (1 line) — the single clearest insight or thesis behind the idea.

problem (3 bullets max) — who's in pain and what specifically hurts for them (concrete scenarios).

target user / early adopter (1–2 bullets) — the precise person who'll adopt first and why.

solution / value prop (3 bullets) — what the product actually does and the emotional/functional benefit.

one-liner & 30s pitch — a crisp tagline + a 30-second spoken pitch you'd say to an investor/partner.

MVP (must be tiny) — the minimal thing to build and the single core interaction to validate.

key metrics to watch (3 max) — metrics that will prove it's working (with target thresholds).

high-risk assumptions (3) — the things that make-or-break the idea; call them out plainly.

cheap experiments to test assumptions (5) — each experiment: what to do, what to measure, and what success looks like.

monetization options (3 quick ops) — realistic ways to make money early and which to try first.

roadmap (30/90 day plan) — specific milestones and deliverables for next 30 and 90 days.

tone check (1 bullet) — a guess at the brand voice that would resonate with users.

what I'm missing / a hard challenge — one blunt, uncomfortable risk or missing piece I should face.

3 tactical next actions (tomorrow) — exact actions I can do tomorrow (not vague).

Style rules:

Keep each numbered section concise and scannable; use bullets where helpful.

Be opinionated. If you're guessing, prefix with "(assume)" or "(guess)".

Don't ask clarifying questions first; produce output from the idea and note any guesses.

If the idea overlaps with existing products/companies, name 1 example and say why this idea is different.

End with a short, warm nudge: one sentence that motivates me to act.

Optional: After the framework, offer one alternative direction (a "wild pivot") that keeps the core insight but targets a different user or business model.

My idea: "#;

/// Opens URLs outside the note widget (browser tab, system handler).
pub trait ExternalLauncher {
    fn open_external(&self, url: &str);
}

/// Fills the template for `kind` with `text`.
///
/// Returns `None` for empty or whitespace-only text.
pub fn compose_prompt(text: &str, kind: NoteType) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }
    let preamble = match kind {
        NoteType::Braindump => BRAINDUMP_PREAMBLE,
        NoteType::Idea => IDEA_PREAMBLE,
    };
    Some(format!("{preamble}{text}"))
}

/// Builds the assistant URL carrying `prompt` as its query.
pub fn launch_url(prompt: &str) -> String {
    format!("{ASSISTANT_BASE_URL}{}", urlencoding::encode(prompt))
}

/// Composes a prompt from the note and opens it through `launcher`.
///
/// Returns `false` without side effects when `text` is blank.
pub fn ask_assistant(text: &str, kind: NoteType, launcher: &impl ExternalLauncher) -> bool {
    let Some(prompt) = compose_prompt(text, kind) else {
        return false;
    };
    let url = launch_url(&prompt);
    info!(
        "event=assistant_launch module=prompt status=ok kind={} url_len={}",
        kind.as_str(),
        url.len()
    );
    launcher.open_external(&url);
    true
}
