// Built-in career catalog. Salaries are national median annual figures (USD).

use super::{CareerCatalog, CareerRecord, EducationLevel, Sector};

use EducationLevel::{Advanced, Associate, Bachelor, Certificate};

fn career(
    id: &str,
    title: &str,
    sector: Sector,
    required_education: EducationLevel,
    average_salary: u32,
    description: &str,
    skill_tags: &[&str],
) -> CareerRecord {
    CareerRecord {
        id: id.to_string(),
        title: title.to_string(),
        sector,
        required_education,
        average_salary,
        description: description.to_string(),
        skill_tags: skill_tags.iter().map(|s| s.to_string()).collect(),
    }
}

/// Returns the catalog shipped with the service.
pub fn builtin_catalog() -> CareerCatalog {
    CareerCatalog::new(vec![
        // Healthcare
        career(
            "registered-nurse",
            "Registered Nurse",
            Sector::Healthcare,
            Associate,
            81_220,
            "Provides and coordinates patient care in hospitals, clinics, and communities.",
            &["patient care", "clinical assessment", "teamwork"],
        ),
        career(
            "medical-assistant",
            "Medical Assistant",
            Sector::Healthcare,
            Certificate,
            38_270,
            "Handles clinical and administrative tasks in physician offices.",
            &["patient intake", "vital signs", "scheduling"],
        ),
        career(
            "physical-therapist",
            "Physical Therapist",
            Sector::Healthcare,
            Advanced,
            97_720,
            "Helps injured or ill people improve movement and manage pain.",
            &["anatomy", "rehabilitation", "patient coaching"],
        ),
        career(
            "physician",
            "Physician",
            Sector::Healthcare,
            Advanced,
            229_300,
            "Diagnoses and treats illnesses and injuries.",
            &["diagnosis", "medical science", "decision making"],
        ),
        // Technology
        career(
            "software-developer",
            "Software Developer",
            Sector::Technology,
            Bachelor,
            127_260,
            "Designs, builds, and maintains software applications.",
            &["programming", "problem solving", "version control"],
        ),
        career(
            "it-support-specialist",
            "IT Support Specialist",
            Sector::Technology,
            Certificate,
            57_910,
            "Keeps computer systems and networks running for organizations.",
            &["troubleshooting", "networking", "customer service"],
        ),
        career(
            "cybersecurity-analyst",
            "Cybersecurity Analyst",
            Sector::Technology,
            Bachelor,
            112_000,
            "Protects an organization's systems and data from attacks.",
            &["network security", "risk analysis", "incident response"],
        ),
        // Engineering
        career(
            "civil-engineer",
            "Civil Engineer",
            Sector::Engineering,
            Bachelor,
            89_940,
            "Plans and oversees roads, bridges, water systems, and buildings.",
            &["structural analysis", "CAD", "project planning"],
        ),
        career(
            "engineering-technician",
            "Engineering Technician",
            Sector::Engineering,
            Associate,
            62_000,
            "Supports engineers with testing, drafting, and field work.",
            &["technical drawing", "testing", "measurement"],
        ),
        // Business
        career(
            "marketing-manager",
            "Marketing Manager",
            Sector::Business,
            Bachelor,
            140_040,
            "Plans campaigns that build demand for products and services.",
            &["market research", "strategy", "communication"],
        ),
        career(
            "small-business-owner",
            "Small Business Owner",
            Sector::Business,
            Certificate,
            60_000,
            "Starts and runs an independent business.",
            &["entrepreneurship", "budgeting", "sales"],
        ),
        // Finance
        career(
            "accountant",
            "Accountant",
            Sector::Finance,
            Bachelor,
            78_000,
            "Prepares and examines financial records and tax filings.",
            &["bookkeeping", "spreadsheets", "tax law"],
        ),
        career(
            "bank-teller",
            "Bank Teller",
            Sector::Finance,
            Certificate,
            36_310,
            "Handles customer transactions at banks and credit unions.",
            &["cash handling", "customer service", "accuracy"],
        ),
        // Education
        career(
            "high-school-teacher",
            "High School Teacher",
            Sector::Education,
            Bachelor,
            62_360,
            "Teaches academic subjects to students in grades 9 through 12.",
            &["lesson planning", "public speaking", "mentoring"],
        ),
        career(
            "teacher-assistant",
            "Teacher Assistant",
            Sector::Education,
            Associate,
            31_000,
            "Supports classroom teachers with instruction and supervision.",
            &["tutoring", "classroom support", "patience"],
        ),
        // Creative
        career(
            "graphic-designer",
            "Graphic Designer",
            Sector::Creative,
            Bachelor,
            57_990,
            "Creates visual concepts for print and digital media.",
            &["visual design", "typography", "design software"],
        ),
        career(
            "photographer",
            "Photographer",
            Sector::Creative,
            Certificate,
            40_170,
            "Captures images for clients, publications, and events.",
            &["photography", "lighting", "photo editing"],
        ),
        career(
            "animator",
            "Animator",
            Sector::Creative,
            Bachelor,
            99_060,
            "Creates animation and visual effects for film, games, and ads.",
            &["animation", "storyboarding", "3D modeling"],
        ),
        // Media
        career(
            "journalist",
            "Journalist",
            Sector::Media,
            Bachelor,
            57_500,
            "Researches and reports news for print, broadcast, and online outlets.",
            &["writing", "interviewing", "fact checking"],
        ),
        career(
            "video-editor",
            "Video Editor",
            Sector::Media,
            Associate,
            66_600,
            "Assembles recorded footage into finished video productions.",
            &["video editing", "storytelling", "audio mixing"],
        ),
        // Skilled trades
        career(
            "electrician",
            "Electrician",
            Sector::SkilledTrades,
            Certificate,
            61_590,
            "Installs and maintains electrical systems in homes and businesses.",
            &["wiring", "electrical code", "blueprint reading"],
        ),
        career(
            "hvac-technician",
            "HVAC Technician",
            Sector::SkilledTrades,
            Certificate,
            57_300,
            "Installs and repairs heating, cooling, and refrigeration systems.",
            &["mechanical repair", "diagnostics", "customer service"],
        ),
        career(
            "carpenter",
            "Carpenter",
            Sector::SkilledTrades,
            Certificate,
            56_350,
            "Builds and repairs structures and frameworks made of wood and other materials.",
            &["woodworking", "measurement", "power tools"],
        ),
        // Manufacturing
        career(
            "welder",
            "Welder",
            Sector::Manufacturing,
            Certificate,
            48_940,
            "Joins metal parts for manufacturing and construction.",
            &["welding", "blueprint reading", "metal fabrication"],
        ),
        career(
            "cnc-machinist",
            "CNC Machinist",
            Sector::Manufacturing,
            Certificate,
            50_840,
            "Programs and operates computer-controlled machining tools.",
            &["CNC programming", "precision measurement", "quality control"],
        ),
        // Environmental
        career(
            "environmental-scientist",
            "Environmental Scientist",
            Sector::Environmental,
            Bachelor,
            78_980,
            "Studies environmental problems and develops solutions.",
            &["field sampling", "data analysis", "environmental regulation"],
        ),
        career(
            "agricultural-technician",
            "Agricultural Technician",
            Sector::Environmental,
            Associate,
            44_000,
            "Supports farm and food research with testing and field work.",
            &["crop science", "lab testing", "equipment operation"],
        ),
        // Science
        career(
            "lab-technician",
            "Clinical Laboratory Technician",
            Sector::Science,
            Associate,
            60_780,
            "Runs laboratory tests that help diagnose and treat disease.",
            &["lab procedures", "microscopy", "data recording"],
        ),
        career(
            "research-scientist",
            "Research Scientist",
            Sector::Science,
            Advanced,
            103_000,
            "Designs and runs experiments to expand scientific knowledge.",
            &["experimental design", "statistics", "scientific writing"],
        ),
        // Legal
        career(
            "paralegal",
            "Paralegal",
            Sector::Legal,
            Associate,
            60_970,
            "Assists lawyers with research, documents, and case preparation.",
            &["legal research", "document drafting", "organization"],
        ),
        career(
            "lawyer",
            "Lawyer",
            Sector::Legal,
            Advanced,
            145_760,
            "Advises and represents clients on legal matters.",
            &["argumentation", "legal research", "negotiation"],
        ),
        // Public service
        career(
            "police-officer",
            "Police Officer",
            Sector::PublicService,
            Certificate,
            74_910,
            "Protects lives and property and enforces laws.",
            &["de-escalation", "physical fitness", "report writing"],
        ),
        career(
            "social-worker",
            "Social Worker",
            Sector::PublicService,
            Bachelor,
            58_380,
            "Helps people cope with challenges in their lives.",
            &["case management", "empathy", "community resources"],
        ),
        // Hospitality
        career(
            "chef",
            "Chef",
            Sector::Hospitality,
            Certificate,
            58_920,
            "Directs food preparation in restaurants and other eating places.",
            &["cooking", "menu planning", "kitchen management"],
        ),
        career(
            "hotel-manager",
            "Hotel Manager",
            Sector::Hospitality,
            Bachelor,
            65_360,
            "Runs lodging operations and guest services.",
            &["operations", "customer service", "staff scheduling"],
        ),
    ])
}
