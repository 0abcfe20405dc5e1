//! Content documents — the portfolio singleton and its satellite
//! collections (articles, gallery photos, notifications).
//!
//! These carry no decision logic; the gateway maps them one-to-one onto
//! store operations. They live in core so the store seeding and the REST
//! surface agree on one JSON shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// The portfolio singleton document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: String,
    pub name: String,
    pub title: String,
    pub bio: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub hero_image: String,
    #[serde(default)]
    pub skills: Vec<Value>,
    #[serde(default)]
    pub experience: Vec<Value>,
    #[serde(default)]
    pub projects: Vec<Value>,
    #[serde(default)]
    pub contact: HashMap<String, String>,
    #[serde(default = "default_sections_order")]
    pub sections_order: Vec<String>,
    #[serde(default)]
    pub sections_visible: HashMap<String, bool>,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_accent")]
    pub accent_color: String,
    pub updated_at: DateTime<Utc>,
}

fn default_sections_order() -> Vec<String> {
    ["hero", "about", "skills", "experience", "projects", "contact"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_theme() -> String {
    "light".into()
}
fn default_accent() -> String {
    "#6A00FF".into()
}

impl Default for Portfolio {
    /// A fully populated demo portfolio, so a fresh instance renders a
    /// presentable site before the owner edits anything.
    fn default() -> Self {
        use serde_json::json;
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Ada Laurent".into(),
            title: "Creative Developer & Designer".into(),
            bio: "I'm a passionate developer who loves creating beautiful, functional digital \
                  experiences. With expertise in web development, UI/UX design, and creative \
                  problem-solving, I bring ideas to life with code and creativity."
                .into(),
            avatar_url: String::new(),
            hero_image: String::new(),
            skills: vec![
                json!({"name": "React", "level": 90, "category": "Frontend"}),
                json!({"name": "Python", "level": 85, "category": "Backend"}),
                json!({"name": "UI/UX Design", "level": 88, "category": "Design"}),
                json!({"name": "TypeScript", "level": 82, "category": "Frontend"}),
                json!({"name": "Node.js", "level": 80, "category": "Backend"}),
                json!({"name": "Figma", "level": 85, "category": "Design"}),
            ],
            experience: vec![
                json!({
                    "id": Uuid::new_v4().to_string(),
                    "title": "Senior Frontend Developer",
                    "company": "Tech Innovators Inc.",
                    "period": "2022 - Present",
                    "description": "Leading frontend development for enterprise applications.",
                }),
                json!({
                    "id": Uuid::new_v4().to_string(),
                    "title": "UI/UX Designer",
                    "company": "Creative Studio",
                    "period": "2020 - 2022",
                    "description": "Designed user interfaces for mobile and web applications.",
                }),
            ],
            projects: vec![
                json!({
                    "id": Uuid::new_v4().to_string(),
                    "title": "E-Commerce Platform",
                    "description": "A modern shopping experience with AI recommendations.",
                    "image": "https://images.unsplash.com/photo-1556742049-0cfed4f6a45d?w=600",
                    "tags": ["React", "Node.js", "MongoDB"],
                    "link": "#",
                }),
                json!({
                    "id": Uuid::new_v4().to_string(),
                    "title": "Portfolio Dashboard",
                    "description": "Analytics dashboard for creative professionals.",
                    "image": "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=600",
                    "tags": ["Vue.js", "Python", "D3.js"],
                    "link": "#",
                }),
                json!({
                    "id": Uuid::new_v4().to_string(),
                    "title": "Social Media App",
                    "description": "Community platform for artists and designers.",
                    "image": "https://images.unsplash.com/photo-1611162617474-5b21e879e113?w=600",
                    "tags": ["React Native", "Firebase"],
                    "link": "#",
                }),
            ],
            contact: [
                ("email", "ada@example.com"),
                ("phone", "+1 234 567 890"),
                ("location", "San Francisco, CA"),
                ("linkedin", "https://linkedin.com/in/ada"),
                ("github", "https://github.com/ada"),
                ("twitter", "https://twitter.com/ada"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
            sections_order: default_sections_order(),
            sections_visible: default_sections_order()
                .into_iter()
                .map(|s| (s, true))
                .collect(),
            theme: default_theme(),
            accent_color: default_accent(),
            updated_at: Utc::now(),
        }
    }
}

/// A blog article with embedded comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a client supplies when creating an article.
#[derive(Debug, Clone, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub cover_image: String,
}

impl Article {
    pub fn create(new: NewArticle) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            content: new.content,
            excerpt: new.excerpt,
            cover_image: new.cover_image,
            published: false,
            likes: 0,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A reader comment embedded in an article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default = "new_id")]
    pub id: String,
    pub author_name: String,
    pub content: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl Comment {
    pub fn new(author_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            author_name: author_name.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// A gallery photo. `order` drives display ordering; `url` may carry an
/// inline base64 payload for uploaded images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryPhoto {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub order: i64,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl GalleryPhoto {
    pub fn new(url: impl Into<String>, caption: impl Into<String>, order: i64) -> Self {
        Self {
            id: new_id(),
            url: url.into(),
            caption: caption.into(),
            visible: true,
            order,
            created_at: Utc::now(),
        }
    }
}

/// An admin-facing notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default = "new_id")]
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(default = "default_notification_kind", rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_notification_kind() -> String {
    "info".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portfolio_default_has_all_sections_visible() {
        let portfolio = Portfolio::default();
        assert_eq!(portfolio.sections_order.len(), 6);
        assert!(portfolio.sections_visible.values().all(|v| *v));
    }

    #[test]
    fn portfolio_default_carries_demo_content() {
        let portfolio = Portfolio::default();
        assert_eq!(portfolio.skills.len(), 6);
        assert_eq!(portfolio.experience.len(), 2);
        assert_eq!(portfolio.projects.len(), 3);
        assert!(portfolio.contact.contains_key("email"));
        // Experience and project entries carry their own ids
        assert!(portfolio.experience.iter().all(|e| e["id"].is_string()));
        assert!(portfolio.projects.iter().all(|p| !p["tags"].as_array().unwrap().is_empty()));
    }

    #[test]
    fn article_create_starts_unpublished() {
        let article = Article::create(NewArticle {
            title: "Hello".into(),
            content: "World".into(),
            excerpt: String::new(),
            cover_image: String::new(),
        });
        assert!(!article.published);
        assert_eq!(article.likes, 0);
        assert!(article.comments.is_empty());
    }

    #[test]
    fn notification_defaults_from_partial_json() {
        let note: Notification = serde_json::from_str(
            r#"{"title": "Reminder", "message": "Check deadlines"}"#,
        )
        .unwrap();
        assert_eq!(note.kind, "info");
        assert!(!note.read);
        assert!(!note.id.is_empty());
    }
}
