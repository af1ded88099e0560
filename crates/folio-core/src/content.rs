//! Static content of the page. Plain records, declared once and never mutated.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub name: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: &'static str,
    /// Proficiency, 0 to 100.
    pub level: f32,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCategory {
    pub title: &'static str,
    pub skills: &'static [Skill],
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
    pub live_demo: Option<&'static str>,
    pub source: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub company: &'static str,
    pub position: &'static str,
    pub duration: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactChannel {
    pub title: &'static str,
    pub value: &'static str,
    pub link: Option<&'static str>,
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationRow {
    pub degree: &'static str,
    pub score: &'static str,
}

pub const OWNER: &str = "Kuldeep Prajapati";
pub const INITIALS: &str = "KP";
pub const TAGLINE: &str = "Web Developer | Problem Solver | Tech Enthusiast";
pub const FOOTER_TAGLINE: &str = "Web Developer | Problem Solver";

pub const NAV_LINKS: &[NavLink] = &[
    NavLink { name: "Home", href: "#home" },
    NavLink { name: "About", href: "#about" },
    NavLink { name: "Skills", href: "#skills" },
    NavLink { name: "Experience", href: "#experience" },
    NavLink { name: "Contact", href: "#contact" },
];

pub const ABOUT_LEAD: &str = "I'm a dedicated web developer focused on building innovative digital solutions that solve real-world problems.";

pub const ABOUT_BODY: &[&str] = &[
    "With a strong foundation in modern web technologies, I specialize in creating responsive, user-friendly applications that deliver exceptional experiences. My background in computer science has equipped me with problem-solving skills and a deep understanding of software development principles.",
    "I'm constantly learning and exploring new technologies to stay at the cutting edge of web development, enabling me to implement the most effective solutions for each project.",
];

pub const MISSION: &str = "\"Passionate about building innovative digital solutions and aiming to create a unicorn startup in India.\"";

pub const EDUCATION: &[EducationRow] = &[
    EducationRow { degree: "B.Tech in Computer Science", score: "77% (CGPA 7.7)" },
    EducationRow { degree: "Intermediate", score: "73%" },
    EducationRow { degree: "High School", score: "78%" },
];

pub const SKILL_CATEGORIES: &[SkillCategory] = &[
    SkillCategory {
        title: "Frontend",
        skills: &[
            Skill { name: "React.js", level: 90.0, icon: "braces" },
            Skill { name: "JavaScript/TypeScript", level: 85.0, icon: "code" },
            Skill { name: "HTML/CSS", level: 95.0, icon: "file-code" },
            Skill { name: "UI/UX Design", level: 80.0, icon: "paint-bucket" },
        ],
    },
    SkillCategory {
        title: "Backend",
        skills: &[
            Skill { name: "Node.js", level: 88.0, icon: "server" },
            Skill { name: "Express", level: 85.0, icon: "server" },
            Skill { name: "RESTful APIs", level: 92.0, icon: "globe" },
            Skill { name: "MongoDB", level: 80.0, icon: "database" },
        ],
    },
    SkillCategory {
        title: "Tools & Others",
        skills: &[
            Skill { name: "Git & GitHub", level: 90.0, icon: "git-branch" },
            Skill { name: "Responsive Design", level: 95.0, icon: "smartphone-nfc" },
            Skill { name: "Figma", level: 75.0, icon: "figma" },
            Skill { name: "Terminal & CLI", level: 85.0, icon: "terminal" },
        ],
    },
];

pub const PROJECTS: &[Project] = &[
    Project {
        title: "CRM-Based Library System",
        description: "A comprehensive library management system with CRM features for tracking user borrowing patterns and preferences.",
        tech: &["React", "Node.js", "MongoDB", "Express"],
        live_demo: Some("#"),
        source: Some("#"),
    },
    Project {
        title: "Contract Management System",
        description: "A secure platform for managing, signing, and tracking legal contracts with automated reminder system.",
        tech: &["React", "Firebase", "Material UI", "Redux"],
        live_demo: Some("#"),
        source: Some("#"),
    },
    Project {
        title: "E-Talk for Licensing Authorities",
        description: "A communication platform designed specifically for licensing authorities to streamline approval processes.",
        tech: &["Vue.js", "Node.js", "Socket.io", "PostgreSQL"],
        live_demo: Some("#"),
        source: Some("#"),
    },
];

pub const EXPERIENCE: &[ExperienceEntry] = &[
    ExperienceEntry {
        company: "Oasis Infobyte",
        position: "Web Development Intern",
        duration: "May 2022 - July 2022",
        description: "Developed responsive websites and web applications. Collaborated with senior developers to implement new features and improved existing functionality.",
    },
    ExperienceEntry {
        company: "IT Academics Pvt. Ltd.",
        position: "Frontend Developer Intern",
        duration: "Jan 2022 - April 2022",
        description: "Designed and implemented user interfaces for multiple web applications. Worked on optimizing application performance and improving user experience.",
    },
];

pub const CONTACT_CHANNELS: &[ContactChannel] = &[
    ContactChannel {
        title: "Email",
        value: "kuldeepprajapati2111@gmail.com",
        link: Some("mailto:kuldeepprajapati2111@gmail.com"),
        icon: "mail",
    },
    ContactChannel {
        title: "Phone",
        value: "+91 7380892966",
        link: Some("tel:+917380892966"),
        icon: "phone",
    },
    ContactChannel {
        title: "LinkedIn",
        value: "linkedin.com/in/kuldeep-prajapati-aa9276178",
        link: Some("https://linkedin.com/in/"),
        icon: "linkedin",
    },
    ContactChannel {
        title: "GitHub",
        value: "github.com/kuldeep541",
        link: Some("https://github.com/"),
        icon: "github",
    },
    ContactChannel {
        title: "Location",
        value: "Lucknow,Uttar Pradesh, India",
        link: None,
        icon: "map-pin",
    },
];

pub const SOCIAL_LINKS: &[ContactChannel] = &[
    ContactChannel {
        title: "Email",
        value: "kuldeep@example.com",
        link: Some("mailto:kuldeep@example.com"),
        icon: "mail",
    },
    ContactChannel {
        title: "LinkedIn",
        value: "linkedin.com",
        link: Some("https://linkedin.com"),
        icon: "linkedin",
    },
    ContactChannel {
        title: "GitHub",
        value: "github.com",
        link: Some("https://github.com"),
        icon: "github",
    },
];
