pub const BRAND_NAME: &str = "Nexorum";
pub const BRAND_LOGO: &str = "/logo-fialove.svg";
pub const JA_LOGO: &str = "/ja_czech.png";
pub const FORM_ENDPOINT: &str = "https://formspree.io/f/mankqrbj";
pub const COPYRIGHT: &str = "© 2025 Nexorum. Všechna práva vyhrazena.";

pub struct Service {
    pub icon: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

pub const SERVICES: [Service; 4] = [
    Service {
        icon: "🌐",
        title: "Webové Stránky",
        body: "Vytváříme moderní, responzivní webové stránky s důrazem na uživatelský komfort a výkon",
    },
    Service {
        icon: "👥",
        title: "Sociální Sítě",
        body: "Vyvíjíme malé až střední sociální platformy pro specifické komunity a projekty",
    },
    Service {
        icon: "📱",
        title: "Web Aplikace",
        body: "Budujeme interaktivní webové aplikace s pokročilými funkcemi a možnostmi",
    },
    Service {
        icon: "⚡",
        title: "Moderní Technologie",
        body: "Používáme nejnovější technologie jako React, Node.js, JSX a další",
    },
];

pub struct Project {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
}

pub const PROJECTS: [Project; 2] = [
    Project {
        icon: "👥",
        title: "Městské občanské fórum",
        description: "Komunitní platforma pro studenty vysokých škol k výměně znalostí",
        tech: &["PHP", "JavaScript", "MySQL"],
    },
    Project {
        icon: "💼",
        title: "Firemní Prezentace",
        description: "Elegantní webové stránky pro moderní technologickou firmu",
        tech: &["React", "Tailwind CSS", "Vite"],
    },
];

/// `(src, alt)` of each logo in the scrolling strip.
pub const TECH_LOGOS: [(&str, &str); 6] = [
    ("/logos/react.svg", "React"),
    ("/logos/nodejs.svg", "Node.js"),
    ("/logos/git-hub.svg", "GitHub"),
    ("/logos/mysql.svg", "MySQL"),
    ("/logos/php.svg", "PHP"),
    ("/logos/javascript.svg", "JavaScript"),
];

pub struct ContactChannel {
    pub icon: &'static str,
    pub heading: &'static str,
    pub href: &'static str,
    pub label: &'static str,
    pub external: bool,
}

pub const CONTACT_CHANNELS: [ContactChannel; 3] = [
    ContactChannel {
        icon: "📧",
        heading: "Email",
        href: "mailto:jakub.muzik@mendelova-stredni.cz",
        label: "jakub.muzik@mendelova-stredni.cz",
        external: false,
    },
    ContactChannel {
        icon: "📱",
        heading: "Telefon",
        href: "tel:+420739433570",
        label: "+420 739 433 570",
        external: false,
    },
    ContactChannel {
        icon: "📸",
        heading: "Instagram",
        href: "https://instagram.com/nexorum.ja",
        label: "@nexorum.ja",
        external: true,
    },
];
