pub(super) const INTENTIONS: &[&str] = &[
    "find_cofounder",
    "mentorship",
    "mentor_others",
    "networking",
    "hiring",
    "job_seeking",
    "collaboration",
    "investing",
    "friendship",
];

pub(super) const EXPERIENCE_LEVELS: &[&str] = &[
    "entry", "junior", "mid", "senior", "lead", "executive",
];

pub(super) const CAREER_STAGES: &[&str] = &[
    "student",
    "early_career",
    "mid_career",
    "senior",
    "executive",
    "founder",
    "career_changer",
];

pub(super) const INDUSTRIES: &[&str] = &[
    "technology",
    "finance",
    "consulting",
    "healthcare",
    "education",
    "media",
    "retail",
    "manufacturing",
    "energy",
    "real_estate",
    "legal",
    "government",
    "nonprofit",
    "hospitality",
    "other",
];

pub(super) const SKILLS: &[&str] = &[
    "software_engineering",
    "mobile_development",
    "web_development",
    "data_science",
    "machine_learning",
    "devops",
    "cybersecurity",
    "product_management",
    "design",
    "ux_research",
    "marketing",
    "sales",
    "business_development",
    "customer_success",
    "finance",
    "accounting",
    "fundraising",
    "strategy",
    "consulting",
    "operations",
    "project_management",
    "analytics",
    "leadership",
    "public_speaking",
    "writing",
    "content_creation",
    "negotiation",
    "legal",
    "hr",
    "entrepreneurship",
];

pub(super) const HOBBIES: &[&str] = &[
    "running",
    "cycling",
    "hiking",
    "climbing",
    "yoga",
    "fitness",
    "tennis",
    "basketball",
    "soccer",
    "cooking",
    "coffee",
    "wine",
    "travel",
    "photography",
    "music",
    "reading",
    "gaming",
    "film",
    "art",
    "volunteering",
];

pub(super) const VALUES: &[&str] = &[
    "integrity",
    "ambition",
    "curiosity",
    "collaboration",
    "impact",
    "growth",
    "balance",
    "creativity",
    "diversity",
    "transparency",
    "independence",
    "community",
];
