// Static portfolio content.
// Profile, education, and work history shown alongside the repository list.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub name: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Profile {
    pub name: &'static str,
    pub headline: &'static str,
    pub bio: &'static str,
    pub links: &'static [Link],
}

#[derive(Debug, Clone, Copy)]
pub struct Education {
    pub institution: &'static str,
    pub degree: &'static str,
    pub period: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Experience {
    pub role: &'static str,
    pub company: &'static str,
    pub period: &'static str,
    pub description: &'static str,
}

pub const PROFILE: Profile = Profile {
    name: "JFMGDB",
    headline: "Senior Frontend/Full-Stack Engineer & Product Manager",
    bio: "Senior software engineer who enjoys building scalable, high-quality products \
          with React, React Native, and cloud ecosystems. This is a dynamic portfolio app.",
    links: &[
        Link {
            name: "GitHub",
            url: "https://github.com/JFMGDB",
        },
        Link {
            name: "LinkedIn",
            url: "https://linkedin.com/in/jfmgdb",
        },
    ],
};

pub const EDUCATION: &[Education] = &[Education {
    institution: "Federal University",
    degree: "B.Sc. in Computer Science",
    period: "2015 - 2019",
    description: "Computer science degree focused on software development and systems architecture.",
}];

/// Most recent role last.
pub const EXPERIENCE: &[Experience] = &[
    Experience {
        role: "Senior Software Engineer",
        company: "Startup Veloce",
        period: "2020 - 2022",
        description: "Built scalable web and mobile applications with React, React Native, \
                      and Node.js. Technical lead for development teams.",
    },
    Experience {
        role: "Product Manager & Tech Lead",
        company: "TechCorp",
        period: "2022 - Present",
        description: "Product management and technical leadership, defining product strategy \
                      and cloud systems architecture.",
    },
];
