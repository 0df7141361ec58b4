//! Notification digest rendering
//!
//! A digest covers a whole batch of new jobs: one subject line with the
//! batch size and one plain-text body listing every job.

use crate::domain::job::Job;

/// Number of characters of job content included in a digest entry
pub const EXCERPT_CHARS: usize = 200;

const SEPARATOR_WIDTH: usize = 50;

/// Rendered notification for a batch of jobs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub subject: String,
    pub body: String,
}

impl Digest {
    pub fn render(jobs: &[Job]) -> Self {
        Self {
            subject: subject_line(jobs.len()),
            body: render_body(jobs),
        }
    }
}

fn subject_line(count: usize) -> String {
    if count == 1 {
        "New Jobs Alert - 1 new position found".to_string()
    } else {
        format!("New Jobs Alert - {} new positions found", count)
    }
}

fn render_body(jobs: &[Job]) -> String {
    let mut body = String::from("New job postings found:\n\n");

    for job in jobs {
        body.push_str(&format!("Title: {}\n", job.title));
        body.push_str(&format!("Company: {}\n", job.company));
        body.push_str(&format!("Location: {}\n", job.location.name));
        body.push_str(&format!("Apply here: {}\n", job.absolute_url));

        if let Some(content) = job.content.as_deref().filter(|c| !c.is_empty()) {
            body.push_str(&format!("\nDescription: {}...\n", excerpt(content)));
        }

        body.push('\n');
        body.push_str(&"-".repeat(SEPARATOR_WIDTH));
        body.push_str("\n\n");
    }

    body
}

/// First `EXCERPT_CHARS` characters, cut on a char boundary
fn excerpt(content: &str) -> &str {
    match content.char_indices().nth(EXCERPT_CHARS) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_pluralization() {
        let one = vec![Job::new("Engineer", "https://x/1", "Acme")];
        assert_eq!(
            Digest::render(&one).subject,
            "New Jobs Alert - 1 new position found"
        );

        let three = vec![
            Job::new("Engineer", "https://x/1", "Acme"),
            Job::new("Engineer II", "https://x/2", "Acme"),
            Job::new("Staff Engineer", "https://x/3", "Acme"),
        ];
        assert_eq!(
            Digest::render(&three).subject,
            "New Jobs Alert - 3 new positions found"
        );
    }

    #[test]
    fn test_body_lists_every_job() {
        let jobs = vec![
            Job::new("Research Engineer", "https://x/1", "Anthropic").with_location("London"),
            Job::new("Infra Engineer", "https://x/2", "OpenAI"),
        ];
        let digest = Digest::render(&jobs);

        assert!(digest.body.starts_with("New job postings found:\n\n"));
        assert!(digest.body.contains("Title: Research Engineer\n"));
        assert!(digest.body.contains("Company: Anthropic\n"));
        assert!(digest.body.contains("Location: London\n"));
        assert!(digest.body.contains("Apply here: https://x/1\n"));
        assert!(digest.body.contains("Location: Remote\n"));
        assert!(digest.body.contains("Company: OpenAI\n"));
        assert!(!digest.body.contains("Description:"));
        assert_eq!(digest.body.matches(&"-".repeat(50)).count(), 2);
    }

    #[test]
    fn test_description_is_truncated() {
        let long = "é".repeat(300);
        let job = Job::new("Engineer", "https://x/1", "Acme").with_content(long);
        let digest = Digest::render(&[job]);

        let expected = format!("Description: {}...\n", "é".repeat(EXCERPT_CHARS));
        assert!(digest.body.contains(&expected));
    }

    #[test]
    fn test_short_description_kept_whole() {
        let job = Job::new("Engineer", "https://x/1", "Acme").with_content("Build things");
        let digest = Digest::render(&[job]);
        assert!(digest.body.contains("\nDescription: Build things...\n"));
    }
}
