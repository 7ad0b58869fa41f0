//! MCQ extraction from uploaded HTML exports.
//!
//! The export format is fixed: each question lives in a
//! `<div class="question-box">` whose first `<p>` holds the prompt (an
//! optional `<img>` carries an illustration), and every following sibling
//! `<div class="answer">` holds one option in its own `<p>`. Documents that
//! don't follow the markers simply extract zero questions; the bot is
//! operated by a single trusted user producing files from a known template,
//! so there is no schema negotiation.

use select::document::Document;
use select::node::Node;
use select::predicate::{And, Class, Name, Predicate};
use serde::{Deserialize, Serialize};

/// One multiple-choice question extracted from an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question prompt. Never empty.
    pub text: String,
    /// Ordered answer options. Never empty: zero-option questions are
    /// dropped during extraction.
    pub options: Vec<String>,
    /// Source locator of the question's illustration, when present.
    pub image_url: Option<String>,
}

fn question_container() -> impl Predicate + Copy {
    And(Name("div"), Class("question-box"))
}

fn answer_container() -> impl Predicate + Copy {
    And(Name("div"), Class("answer"))
}

/// Extracts all questions from `html`, in document order.
///
/// Parsing is lenient: malformed input degrades to an empty (or partial)
/// result, never an error. Containers without a prompt and questions
/// without a single option are skipped.
pub fn extract_questions(html: &str) -> Vec<Question> {
    let doc = Document::from(html);
    let mut questions = Vec::new();

    for container in doc.find(question_container()) {
        let Some(text) = first_paragraph_text(&container) else {
            log::warn!("Question text not found, skipping container");
            continue;
        };

        let options = collect_options(&container);
        if options.is_empty() {
            log::warn!("No options found for question: {}, skipping", preview(&text));
            continue;
        }

        let image_url = container
            .find(Name("img"))
            .next()
            .and_then(|img| img.attr("src"))
            .map(str::to_string);

        questions.push(Question {
            text,
            options,
            image_url,
        });
    }

    questions
}

/// Walks the siblings after a question container, collecting one option per
/// answer div until the next question container starts.
fn collect_options(container: &Node<'_>) -> Vec<String> {
    let mut options = Vec::new();
    let mut sibling = container.next();

    while let Some(node) = sibling {
        if node.is(question_container()) {
            break;
        }
        if node.is(answer_container()) {
            // An answer div without usable text contributes no option.
            if let Some(option) = first_paragraph_text(&node) {
                options.push(option);
            }
        }
        sibling = node.next();
    }

    options
}

/// Trimmed text of the node's first `<p>` descendant, if non-empty.
fn first_paragraph_text(node: &Node<'_>) -> Option<String> {
    node.find(Name("p"))
        .next()
        .map(|p| p.text().trim().to_string())
        .filter(|text| !text.is_empty())
}

fn preview(text: &str) -> String {
    text.chars().take(40).collect()
}
