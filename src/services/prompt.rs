//! Prompt building for both chat surfaces
//!
//! `/api/chat` gets a context assembled from the live portfolio contents;
//! `/api/chatbot/chat` gets a static knowledge base plus the visitor's recent
//! conversation. Canned replies used when no provider is reachable live here
//! too, so every user-facing chat string is in one place.

use crate::config::AssistantConfig;
use crate::models::{Blog, Faq, Project, Resume, Testimonial};
use crate::services::llm::{ChatMessage, Role};

/// Reply when the provider answers without any text
pub const EMPTY_COMPLETION_REPLY: &str = "Sorry, I could not generate a response.";

pub const SUGGESTED_QUESTIONS: [&str; 10] = [
    "What are your full-stack development skills?",
    "Tell me about your cybersecurity expertise",
    "What is OWASP Top 10 and do you know it?",
    "Tell me about your featured projects",
    "What penetration testing tools do you use?",
    "Are you available for freelance work?",
    "What is your experience with Next.js?",
    "Do you provide after-support for projects?",
    "What is your development process?",
    "How can I contact you?",
];

/// Static FAQ served when the AI is unavailable
pub const OFFLINE_FAQ: [(&str, &str); 4] = [
    (
        "What technologies do you work with?",
        "I specialize in modern web technologies including React, Next.js, TypeScript, Node.js, Express, Prisma, PostgreSQL, and Tailwind CSS. I build full-stack applications with a focus on performance and user experience.",
    ),
    (
        "Are you available for work?",
        "Yes! I'm available for both freelance projects and full-time opportunities. I can work remotely and adapt to different time zones.",
    ),
    (
        "How can I contact you?",
        "You can reach me through the contact form on this website. I typically respond within 24 hours.",
    ),
    (
        "What's your experience level?",
        "I have hands-on experience building multiple full-stack applications, implementing secure authentication, creating admin dashboards, and optimizing web performance. Check out my projects section for examples of my work.",
    ),
];

/// Who the assistant speaks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub owner_name: String,
    pub contact_email: Option<String>,
}

impl Persona {
    pub fn from_config(config: &AssistantConfig) -> Self {
        Self {
            owner_name: config.owner_name.clone(),
            contact_email: config.contact_email.clone(),
        }
    }

    fn contact_hint(&self) -> String {
        match &self.contact_email {
            Some(email) => format!("suggest the contact form or emailing {}", email),
            None => "suggest the contact form".to_string(),
        }
    }
}

/// Portfolio contents read once per `/api/chat` request
#[derive(Debug, Clone, Default)]
pub struct PortfolioSnapshot {
    pub projects: Vec<Project>,
    pub blogs: Vec<Blog>,
    pub testimonials: Vec<Testimonial>,
    pub resume: Option<Resume>,
    pub faqs: Vec<Faq>,
}

/// System prompt for `/api/chat`
pub fn assistant_context(snapshot: &PortfolioSnapshot, persona: &Persona) -> String {
    let resume = match &snapshot.resume {
        Some(resume) => format!(
            "- Role: {}\n- Skills: {}",
            resume.role.as_deref().unwrap_or("Not specified"),
            resume.skills.as_deref().unwrap_or("Not specified")
        ),
        None => "Resume data currently being updated.".to_string(),
    };

    let projects = snapshot
        .projects
        .iter()
        .map(|p| {
            format!(
                "- {}: {}. Tech Stack: {}. Live: {}",
                p.title,
                p.description,
                p.technologies,
                p.live_url.as_deref().unwrap_or("Internal")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let blogs = if snapshot.blogs.is_empty() {
        "Blog is currently featuring new content soon.".to_string()
    } else {
        let titles = snapshot
            .blogs
            .iter()
            .take(3)
            .map(|b| format!("- {}", b.title))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "{} technical articles published, including:\n{}",
            snapshot.blogs.len(),
            titles
        )
    };

    let testimonials = snapshot
        .testimonials
        .iter()
        .map(|t| format!("- {}: \"{}\"", t.name, t.content))
        .collect::<Vec<_>>()
        .join("\n");

    let faqs = snapshot
        .faqs
        .iter()
        .map(|f| format!("Q: {}\nA: {}", f.question, f.answer))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are the AI professional guide for {owner}'s portfolio website.\n\
         \n\
         RESUME SUMMARY:\n{resume}\n\
         \n\
         PROJECTS PORTFOLIO:\n{projects}\n\
         \n\
         TECHNICAL BLOGS:\n{blogs}\n\
         \n\
         CLIENT FEEDBACK:\n{testimonials}\n\
         \n\
         FREQUENTLY ASKED QUESTIONS:\n{faqs}\n\
         \n\
         Instructions:\n\
         - You are the official voice of {owner}'s portfolio.\n\
         - Provide detailed, expert-level answers grounded in the information above.\n\
         - Use a confident and friendly tone.\n\
         - If asked about contact, {contact}.\n\
         - Encourage visitors to leave a message through the contact form.",
        owner = persona.owner_name,
        contact = persona.contact_hint(),
    )
}

/// Deterministic `/api/chat` reply used when no provider can be reached
pub fn canned_assistant_reply(snapshot: &PortfolioSnapshot, persona: &Persona) -> String {
    let highlight = snapshot
        .projects
        .first()
        .map(|p| format!(", including {}", p.title))
        .unwrap_or_default();
    format!(
        "Hi! I'm the portfolio assistant for {}. I can't reach my AI service right now, \
         but here is what I know: there are {} project(s) in the portfolio{} and {} technical \
         blog post(s). Feel free to explore the Projects section or leave a message through the \
         contact form!",
        persona.owner_name,
        snapshot.projects.len(),
        highlight,
        snapshot.blogs.len()
    )
}

/// System prompt for the gateway chatbot
pub fn knowledge_base(persona: &Persona) -> String {
    format!(
        "You are an AI assistant for {owner}'s professional portfolio website. You help visitors \
         learn about their skills, experience, and projects.\n\
         \n\
         ABOUT:\n\
         - Full-Stack Developer with a strong focus on security\n\
         - Builds scalable, secure, user-friendly applications\n\
         - Values clean code, continuous learning, and security-first development\n\
         - Available for remote work, freelance projects, and full-time opportunities\n\
         \n\
         FRONTEND: HTML5, CSS3, Tailwind CSS, JavaScript (ES6+), TypeScript, React, Next.js, \
         server-side rendering, SEO optimization, state management (Redux, Zustand, Context API).\n\
         BACKEND: Node.js, Express, RESTful API design, JWT authentication, Prisma, PostgreSQL, \
         MongoDB, SQLite, GraphQL, OAuth.\n\
         DEVOPS: Git and GitHub Actions, Docker, Vercel, Netlify, Render, Railway, CI/CD, Nginx, \
         Cloudflare.\n\
         SECURITY: threat modeling, risk assessment, penetration testing lifecycle, reconnaissance \
         and OSINT, network security, OWASP Top 10, Burp Suite, Metasploit, Nmap, OWASP ZAP, \
         Wireshark, cryptography fundamentals, ISO/IEC 27001 and PCI DSS awareness, responsible \
         disclosure.\n\
         SOFT SKILLS: mentoring, Agile/Scrum, remote collaboration, problem solving, attention \
         to detail.\n\
         \n\
         PROJECTS: the portfolio's Projects section lists live demos and source links for each \
         featured project.\n\
         \n\
         CONTACT: {contact}.\n\
         \n\
         Always respond professionally, accurately, and enthusiastically. Highlight both \
         development and security expertise.",
        owner = persona.owner_name,
        contact = match &persona.contact_email {
            Some(email) => format!("the contact form on the website or {}", email),
            None => "the contact form on the website".to_string(),
        },
    )
}

/// Gateway chatbot reply when the provider call fails
pub fn offline_reply(persona: &Persona) -> String {
    format!(
        "(Offline Mode) I'm currently unable to connect to the AI brain (likely due to a missing \
         or invalid API Key). But I can tell you that {} has built some great projects. Check out \
         the Projects section and the resume for details!",
        persona.owner_name
    )
}

/// System prompt, then at most `window` prior turns, then the new message.
///
/// System turns supplied by the client are dropped so it cannot replace
/// the server's prompt.
pub fn conversation(
    system: String,
    history: &[ChatMessage],
    message: &str,
    window: usize,
) -> Vec<ChatMessage> {
    let turns: Vec<&ChatMessage> = history.iter().filter(|m| m.role != Role::System).collect();
    let recent = &turns[turns.len().saturating_sub(window)..];

    let mut messages = Vec::with_capacity(recent.len() + 2);
    messages.push(ChatMessage::system(system));
    messages.extend(recent.iter().map(|m| (*m).clone()));
    messages.push(ChatMessage::user(message));
    messages
}
