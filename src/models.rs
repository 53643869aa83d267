use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub id: String,
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub degree: String,
    pub institution: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub language: String,
    pub proficiency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub id: String,
    pub name: String,
    pub position: String,
    pub company: String,
    pub contact: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// The single in-memory resume aggregate. Field names serialize as the
/// camelCase keys of the original storage format, so exported JSON
/// round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub references: Vec<Reference>,
}

/// An immutable named snapshot of the document and template at save time.
/// `data` is an owned deep copy; nothing mutates it after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedVersion {
    pub id: String,
    pub name: String,
    pub date: String,
    pub data: ResumeData,
    pub template: String,
}

impl ResumeData {
    /// The hardcoded starter document a fresh store begins with.
    pub fn default_document() -> Self {
        ResumeData {
            personal_info: PersonalInfo {
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                title: "Senior Product Manager".to_string(),
                email: "john.doe@example.com".to_string(),
                phone: "(555) 123-4567".to_string(),
                location: "Accra, Ghana".to_string(),
                linkedin: "linkedin.com/in/johndoe".to_string(),
                website: Some("johndoe.com".to_string()),
                profile_picture: None,
                twitter: Some("@johndoe".to_string()),
                github: Some("github.com/johndoe".to_string()),
            },
            summary: "Results-driven product manager with 7+ years of experience leading \
                      cross-functional teams to deliver innovative solutions. Proven track \
                      record of increasing user engagement and driving revenue growth through \
                      data-informed product decisions."
                .to_string(),
            work_experience: vec![
                WorkExperience {
                    id: "1".to_string(),
                    title: "Senior Product Manager".to_string(),
                    company: "Example Tech Inc.".to_string(),
                    start_date: "Jan 2020".to_string(),
                    end_date: "Present".to_string(),
                    description: String::new(),
                    bullets: vec![
                        "Led product strategy for flagship SaaS platform, resulting in 45% YoY revenue growth".to_string(),
                        "Managed a team of 5 product owners across 3 product lines".to_string(),
                        "Implemented user research program that increased customer satisfaction by 32%".to_string(),
                    ],
                },
                WorkExperience {
                    id: "2".to_string(),
                    title: "Product Manager".to_string(),
                    company: "Tech Solutions Co.".to_string(),
                    start_date: "Mar 2017".to_string(),
                    end_date: "Dec 2019".to_string(),
                    description: String::new(),
                    bullets: vec![
                        "Developed product roadmap and executed release strategy for mobile application".to_string(),
                        "Collaborated with engineering to deliver features on time and within budget".to_string(),
                        "Conducted competitive analysis to identify market opportunities".to_string(),
                    ],
                },
            ],
            education: vec![
                Education {
                    id: "1".to_string(),
                    degree: "MBA, Business Administration".to_string(),
                    institution: "University of Ghana".to_string(),
                    start_date: "Sep 2015".to_string(),
                    end_date: "Jun 2017".to_string(),
                    description: None,
                },
                Education {
                    id: "2".to_string(),
                    degree: "BS, Computer Science".to_string(),
                    institution: "Kwame Nkrumah University of Science and Technology".to_string(),
                    start_date: "Sep 2011".to_string(),
                    end_date: "May 2015".to_string(),
                    description: None,
                },
            ],
            skills: vec![
                "Product Management".to_string(),
                "Team Leadership".to_string(),
                "Strategic Planning".to_string(),
                "User Research".to_string(),
                "Agile Methodologies".to_string(),
                "Data Analysis".to_string(),
            ],
            languages: vec![
                Language {
                    language: "English".to_string(),
                    proficiency: "Native".to_string(),
                },
                Language {
                    language: "French".to_string(),
                    proficiency: "Intermediate".to_string(),
                },
                Language {
                    language: "Twi".to_string(),
                    proficiency: "Fluent".to_string(),
                },
            ],
            certifications: vec![
                Certification {
                    id: "1".to_string(),
                    name: "Certified Scrum Product Owner (CSPO)".to_string(),
                    issuer: "Scrum Alliance".to_string(),
                    date: "Jan 2019".to_string(),
                },
                Certification {
                    id: "2".to_string(),
                    name: "Professional Product Manager (PPM)".to_string(),
                    issuer: "Product Management Institute".to_string(),
                    date: "Mar 2020".to_string(),
                },
            ],
            references: vec![Reference {
                id: "1".to_string(),
                name: "Dr. Kofi Mensah".to_string(),
                position: "Director of Technology".to_string(),
                company: "Tech Solutions Ghana".to_string(),
                contact: "kofi.mensah@example.com".to_string(),
                phone: None,
            }],
        }
    }
}

// --- Partial updates ---
//
// CRUD operations merge these field-wise: only `Some` fields overwrite.

#[derive(Debug, Default, Clone)]
pub struct PersonalInfoPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct WorkExperiencePatch {
    pub title: Option<String>,
    pub company: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub bullets: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone)]
pub struct EducationPatch {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}
