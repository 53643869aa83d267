use crate::models::ResumeData;

const WRAP_WIDTH: usize = 80;

/// Closed set of layouts. Unrecognized identifiers never fail; they fall
/// back to `Modern` at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Modern,
    GhanaFormal,
    GhanaModern,
    GhanaProfessional,
    Professional,
    Creative,
    Minimal,
    Executive,
    Technical,
    Academic,
    Elegant,
}

impl Template {
    pub fn parse(id: &str) -> Self {
        match id {
            "modern" => Template::Modern,
            "ghana-formal" => Template::GhanaFormal,
            "ghana-modern" => Template::GhanaModern,
            "ghana-professional" => Template::GhanaProfessional,
            "professional" => Template::Professional,
            "creative" => Template::Creative,
            "minimal" => Template::Minimal,
            "executive" => Template::Executive,
            "technical" => Template::Technical,
            "academic" => Template::Academic,
            "elegant" => Template::Elegant,
            _ => Template::Modern,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Template::Modern => "modern",
            Template::GhanaFormal => "ghana-formal",
            Template::GhanaModern => "ghana-modern",
            Template::GhanaProfessional => "ghana-professional",
            Template::Professional => "professional",
            Template::Creative => "creative",
            Template::Minimal => "minimal",
            Template::Executive => "executive",
            Template::Technical => "technical",
            Template::Academic => "academic",
            Template::Elegant => "elegant",
        }
    }

    pub fn all() -> &'static [Template] {
        &[
            Template::Modern,
            Template::GhanaFormal,
            Template::GhanaModern,
            Template::GhanaProfessional,
            Template::Professional,
            Template::Creative,
            Template::Minimal,
            Template::Executive,
            Template::Technical,
            Template::Academic,
            Template::Elegant,
        ]
    }
}

/// Rendering knobs. These affect layout only, never the document.
#[derive(Debug, Clone)]
pub struct DisplaySettings {
    /// Scale factor relative to the base font, 1.0 = default.
    pub font_size: f64,
    /// Line spacing factor, 1.0 = single spacing.
    pub line_spacing: f64,
    pub font_family: String,
    pub show_profile_picture: bool,
    pub show_references: bool,
    pub show_certifications: bool,
    pub show_languages: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            font_size: 1.0,
            line_spacing: 1.0,
            font_family: "sans".to_string(),
            show_profile_picture: true,
            show_references: true,
            show_certifications: true,
            show_languages: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Summary,
    Experience,
    Education,
    Skills,
    Languages,
    Certifications,
    References,
}

#[derive(Debug, Clone, Copy)]
enum HeaderBlock {
    /// Name + title + single contact line.
    Compact,
    /// Name + title, each contact field on its own line.
    Stacked,
    /// Name + title centered over the wrap width.
    Centered,
}

#[derive(Debug, Clone, Copy)]
enum Case {
    Upper,
    Lower,
    AsIs,
}

/// Per-template layout recipe: section order plus decoration.
struct Layout {
    header: HeaderBlock,
    header_case: Case,
    rule: Option<char>,
    bullet: &'static str,
    skills_as_list: bool,
    order: &'static [Section],
}

fn layout_for(template: Template) -> Layout {
    use Section::*;
    match template {
        Template::Modern | Template::GhanaModern => Layout {
            header: HeaderBlock::Compact,
            header_case: Case::AsIs,
            rule: Some('─'),
            bullet: "•",
            skills_as_list: false,
            order: if template == Template::GhanaModern {
                // Languages carry more weight in the Ghana variants.
                &[Summary, Experience, Education, Languages, Skills, Certifications, References]
            } else {
                &[Summary, Experience, Education, Skills, Languages, Certifications, References]
            },
        },
        Template::Professional | Template::GhanaProfessional => Layout {
            header: HeaderBlock::Stacked,
            header_case: Case::Upper,
            rule: Some('='),
            bullet: "•",
            skills_as_list: false,
            order: &[Summary, Experience, Education, Skills, Languages, Certifications, References],
        },
        Template::GhanaFormal => Layout {
            header: HeaderBlock::Stacked,
            header_case: Case::Upper,
            rule: Some('-'),
            bullet: "-",
            skills_as_list: false,
            order: &[Summary, Experience, Education, Skills, Languages, Certifications, References],
        },
        Template::Creative => Layout {
            header: HeaderBlock::Compact,
            header_case: Case::AsIs,
            rule: Some('~'),
            bullet: "◆",
            skills_as_list: true,
            order: &[Summary, Skills, Experience, Education, Languages, Certifications, References],
        },
        Template::Minimal => Layout {
            header: HeaderBlock::Compact,
            header_case: Case::Lower,
            rule: None,
            bullet: "-",
            skills_as_list: false,
            order: &[Summary, Experience, Education, Skills, Languages, Certifications, References],
        },
        Template::Executive => Layout {
            header: HeaderBlock::Stacked,
            header_case: Case::Upper,
            rule: Some('━'),
            bullet: "▪",
            skills_as_list: false,
            order: &[Summary, Experience, Certifications, Education, Skills, Languages, References],
        },
        Template::Technical => Layout {
            header: HeaderBlock::Compact,
            header_case: Case::Upper,
            rule: Some('-'),
            bullet: ">",
            skills_as_list: true,
            order: &[Summary, Skills, Experience, Education, Certifications, Languages, References],
        },
        Template::Academic => Layout {
            header: HeaderBlock::Stacked,
            header_case: Case::AsIs,
            rule: Some('—'),
            bullet: "•",
            skills_as_list: false,
            order: &[Summary, Education, Certifications, Experience, Skills, Languages, References],
        },
        Template::Elegant => Layout {
            header: HeaderBlock::Centered,
            header_case: Case::AsIs,
            rule: Some('·'),
            bullet: "·",
            skills_as_list: false,
            order: &[Summary, Experience, Education, Skills, Languages, Certifications, References],
        },
    }
}

fn apply_case(text: &str, case: Case) -> String {
    match case {
        Case::Upper => text.to_uppercase(),
        Case::Lower => text.to_lowercase(),
        Case::AsIs => text.to_string(),
    }
}

fn center(text: &str) -> String {
    if text.len() >= WRAP_WIDTH {
        return text.to_string();
    }
    let pad = (WRAP_WIDTH - text.len()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Pure mapping from (template, document, settings) to a line layout.
pub fn render(template: Template, data: &ResumeData, settings: &DisplaySettings) -> Vec<String> {
    let layout = layout_for(template);
    let mut out = Vec::new();

    push_header(&mut out, data, settings, &layout);
    gap(&mut out, settings);

    for section in layout.order {
        if !section_visible(*section, data, settings) {
            continue;
        }
        push_section_header(&mut out, section_title(*section), &layout);
        push_section_body(&mut out, *section, data, &layout);
        gap(&mut out, settings);
    }

    // Drop trailing blank lines.
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out
}

fn gap(out: &mut Vec<String>, settings: &DisplaySettings) {
    out.push(String::new());
    if settings.line_spacing >= 1.5 {
        out.push(String::new());
    }
}

fn section_visible(section: Section, data: &ResumeData, settings: &DisplaySettings) -> bool {
    match section {
        Section::Summary => !data.summary.is_empty(),
        Section::Experience => !data.work_experience.is_empty(),
        Section::Education => !data.education.is_empty(),
        Section::Skills => !data.skills.is_empty(),
        Section::Languages => settings.show_languages && !data.languages.is_empty(),
        Section::Certifications => settings.show_certifications && !data.certifications.is_empty(),
        Section::References => settings.show_references && !data.references.is_empty(),
    }
}

fn section_title(section: Section) -> &'static str {
    match section {
        Section::Summary => "Professional Summary",
        Section::Experience => "Work Experience",
        Section::Education => "Education",
        Section::Skills => "Skills",
        Section::Languages => "Languages",
        Section::Certifications => "Certifications",
        Section::References => "References",
    }
}

fn push_header(
    out: &mut Vec<String>,
    data: &ResumeData,
    settings: &DisplaySettings,
    layout: &Layout,
) {
    let info = &data.personal_info;
    let name = format!("{} {}", info.first_name, info.last_name);
    let contact = format!("{} | {} | {}", info.email, info.phone, info.location);

    match layout.header {
        HeaderBlock::Compact => {
            out.push(name);
            out.push(info.title.clone());
            out.push(contact);
            let mut links = vec![info.linkedin.clone()];
            links.extend(info.website.clone());
            links.extend(info.github.clone());
            let links: Vec<String> = links.into_iter().filter(|l| !l.is_empty()).collect();
            if !links.is_empty() {
                out.push(links.join(" | "));
            }
        }
        HeaderBlock::Stacked => {
            out.push(name);
            out.push(info.title.clone());
            out.push(info.email.clone());
            out.push(info.phone.clone());
            out.push(info.location.clone());
            if !info.linkedin.is_empty() {
                out.push(info.linkedin.clone());
            }
            if let Some(website) = &info.website {
                out.push(website.clone());
            }
        }
        HeaderBlock::Centered => {
            out.push(center(&name));
            out.push(center(&info.title));
            out.push(center(&contact));
        }
    }

    if settings.show_profile_picture {
        if let Some(picture) = &info.profile_picture {
            out.push(format!("[photo: {picture}]"));
        }
    }

    if let Some(rule) = layout.rule {
        out.push(rule.to_string().repeat(WRAP_WIDTH));
    }
}

fn push_section_header(out: &mut Vec<String>, title: &str, layout: &Layout) {
    let title = apply_case(title, layout.header_case);
    out.push(title.clone());
    if let Some(rule) = layout.rule {
        out.push(rule.to_string().repeat(title.chars().count().max(4)));
    }
}

fn push_section_body(out: &mut Vec<String>, section: Section, data: &ResumeData, layout: &Layout) {
    match section {
        Section::Summary => {
            for line in textwrap::fill(&data.summary, WRAP_WIDTH).lines() {
                out.push(line.to_string());
            }
        }
        Section::Experience => {
            for exp in &data.work_experience {
                out.push(format!("{} — {}", exp.title, exp.company));
                out.push(format!("{} - {}", exp.start_date, exp.end_date));
                if !exp.description.is_empty() {
                    for line in textwrap::fill(&exp.description, WRAP_WIDTH).lines() {
                        out.push(line.to_string());
                    }
                }
                for bullet in &exp.bullets {
                    if bullet.is_empty() {
                        continue;
                    }
                    let wrapped = textwrap::fill(bullet, WRAP_WIDTH - 4);
                    for (i, line) in wrapped.lines().enumerate() {
                        if i == 0 {
                            out.push(format!("  {} {}", layout.bullet, line));
                        } else {
                            out.push(format!("    {line}"));
                        }
                    }
                }
                out.push(String::new());
            }
            if out.last().is_some_and(|l| l.is_empty()) {
                out.pop();
            }
        }
        Section::Education => {
            for edu in &data.education {
                out.push(edu.degree.clone());
                out.push(format!("{} | {} - {}", edu.institution, edu.start_date, edu.end_date));
                if let Some(desc) = &edu.description {
                    if !desc.is_empty() {
                        for line in textwrap::fill(desc, WRAP_WIDTH).lines() {
                            out.push(line.to_string());
                        }
                    }
                }
            }
        }
        Section::Skills => {
            if layout.skills_as_list {
                for skill in &data.skills {
                    out.push(format!("  {} {}", layout.bullet, skill));
                }
            } else {
                for line in textwrap::fill(&data.skills.join(", "), WRAP_WIDTH).lines() {
                    out.push(line.to_string());
                }
            }
        }
        Section::Languages => {
            for lang in &data.languages {
                out.push(format!("{}: {}", lang.language, lang.proficiency));
            }
        }
        Section::Certifications => {
            for cert in &data.certifications {
                out.push(cert.name.clone());
                out.push(format!("{} | {}", cert.issuer, cert.date));
            }
        }
        Section::References => {
            for reference in &data.references {
                out.push(reference.name.clone());
                out.push(format!("{}, {}", reference.position, reference.company));
                out.push(reference.contact.clone());
                if let Some(phone) = &reference.phone {
                    out.push(phone.clone());
                }
            }
        }
    }
}

/// Flattened, labeled plain-text layout for Applicant Tracking Systems.
/// Ignores display settings entirely.
pub fn render_ats(data: &ResumeData) -> Vec<String> {
    let info = &data.personal_info;
    let mut out = Vec::new();

    out.push(format!("{} {}", info.first_name, info.last_name));
    out.push(info.title.clone());
    out.push(format!("{} | {}", info.email, info.phone));
    out.push(info.location.clone());
    if !info.linkedin.is_empty() {
        out.push(info.linkedin.clone());
    }
    if let Some(website) = &info.website {
        out.push(website.clone());
    }
    out.push(String::new());

    out.push("PROFESSIONAL SUMMARY".to_string());
    out.push(data.summary.clone());
    out.push(String::new());

    out.push("WORK EXPERIENCE".to_string());
    for exp in &data.work_experience {
        out.push(exp.title.clone());
        out.push(format!("{} | {} - {}", exp.company, exp.start_date, exp.end_date));
        for bullet in &exp.bullets {
            if !bullet.is_empty() {
                out.push(format!("• {bullet}"));
            }
        }
        out.push(String::new());
    }

    out.push("EDUCATION".to_string());
    for edu in &data.education {
        out.push(edu.degree.clone());
        out.push(format!("{} | {} - {}", edu.institution, edu.start_date, edu.end_date));
    }
    out.push(String::new());

    out.push("SKILLS".to_string());
    out.push(data.skills.join(", "));

    if !data.languages.is_empty() {
        out.push(String::new());
        out.push("LANGUAGES".to_string());
        for lang in &data.languages {
            out.push(format!("{}: {}", lang.language, lang.proficiency));
        }
    }

    if !data.certifications.is_empty() {
        out.push(String::new());
        out.push("CERTIFICATIONS".to_string());
        for cert in &data.certifications {
            out.push(cert.name.clone());
            out.push(format!("{} | {}", cert.issuer, cert.date));
        }
    }

    if !data.references.is_empty() {
        out.push(String::new());
        out.push("REFERENCES".to_string());
        for reference in &data.references {
            out.push(reference.name.clone());
            out.push(format!("{}, {}", reference.position, reference.company));
            out.push(reference.contact.clone());
            if let Some(phone) = &reference.phone {
                out.push(phone.clone());
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_ids() {
        assert_eq!(Template::parse("modern"), Template::Modern);
        assert_eq!(Template::parse("ghana-formal"), Template::GhanaFormal);
        assert_eq!(Template::parse("executive"), Template::Executive);
        for template in Template::all() {
            assert_eq!(Template::parse(template.id()), *template);
        }
    }

    #[test]
    fn test_parse_unknown_falls_back_to_modern() {
        assert_eq!(Template::parse("sparkly-unicorn"), Template::Modern);
        assert_eq!(Template::parse(""), Template::Modern);
    }

    #[test]
    fn test_render_contains_core_fields() {
        let data = ResumeData::default_document();
        for template in Template::all() {
            let lines = render(*template, &data, &DisplaySettings::default());
            let text = lines.join("\n");
            assert!(text.contains("John Doe"), "{} missing name", template.id());
            assert!(
                text.contains("Example Tech Inc."),
                "{} missing experience",
                template.id()
            );
            assert!(
                text.contains("University of Ghana"),
                "{} missing education",
                template.id()
            );
            assert!(
                text.contains("Product Management"),
                "{} missing skills",
                template.id()
            );
        }
    }

    #[test]
    fn test_visibility_toggles_drop_sections() {
        let data = ResumeData::default_document();
        let settings = DisplaySettings {
            show_references: false,
            show_certifications: false,
            show_languages: false,
            ..Default::default()
        };
        let text = render(Template::Modern, &data, &settings).join("\n");
        assert!(!text.contains("Kofi Mensah"));
        assert!(!text.contains("Scrum Alliance"));
        assert!(!text.contains("Twi: Fluent"));
    }

    #[test]
    fn test_profile_picture_toggle() {
        let mut data = ResumeData::default_document();
        data.personal_info.profile_picture = Some("me.png".to_string());

        let shown = render(Template::Modern, &data, &DisplaySettings::default()).join("\n");
        assert!(shown.contains("[photo: me.png]"));

        let settings = DisplaySettings {
            show_profile_picture: false,
            ..Default::default()
        };
        let hidden = render(Template::Modern, &data, &settings).join("\n");
        assert!(!hidden.contains("me.png"));
    }

    #[test]
    fn test_templates_differ_in_section_order() {
        let data = ResumeData::default_document();
        let settings = DisplaySettings::default();

        let index_of = |lines: &[String], needle: &str| {
            lines
                .iter()
                .position(|l| l.to_lowercase().contains(needle))
                .unwrap_or(usize::MAX)
        };

        // Technical leads with skills, academic leads with education.
        let technical = render(Template::Technical, &data, &settings);
        assert!(index_of(&technical, "skills") < index_of(&technical, "work experience"));

        let academic = render(Template::Academic, &data, &settings);
        assert!(index_of(&academic, "education") < index_of(&academic, "work experience"));

        let modern = render(Template::Modern, &data, &settings);
        assert!(index_of(&modern, "work experience") < index_of(&modern, "skills"));
    }

    #[test]
    fn test_wide_line_spacing_adds_lines() {
        let data = ResumeData::default_document();
        let single = render(Template::Modern, &data, &DisplaySettings::default());
        let wide = render(
            Template::Modern,
            &data,
            &DisplaySettings {
                line_spacing: 2.0,
                ..Default::default()
            },
        );
        assert!(wide.len() > single.len());
    }

    #[test]
    fn test_render_is_pure() {
        let data = ResumeData::default_document();
        let settings = DisplaySettings::default();
        let a = render(Template::Elegant, &data, &settings);
        let b = render(Template::Elegant, &data, &settings);
        assert_eq!(a, b);
    }

    #[test]
    fn test_ats_view_labels_and_order() {
        let data = ResumeData::default_document();
        let lines = render_ats(&data);
        let text = lines.join("\n");

        for label in [
            "PROFESSIONAL SUMMARY",
            "WORK EXPERIENCE",
            "EDUCATION",
            "SKILLS",
            "LANGUAGES",
            "CERTIFICATIONS",
            "REFERENCES",
        ] {
            assert!(text.contains(label), "missing {label}");
        }

        let pos = |needle: &str| text.find(needle).unwrap();
        assert!(pos("PROFESSIONAL SUMMARY") < pos("WORK EXPERIENCE"));
        assert!(pos("WORK EXPERIENCE") < pos("EDUCATION"));
        assert!(pos("EDUCATION") < pos("SKILLS"));
    }

    #[test]
    fn test_ats_view_skips_empty_optional_sections() {
        let mut data = ResumeData::default_document();
        data.languages.clear();
        data.certifications.clear();
        data.references.clear();

        let text = render_ats(&data).join("\n");
        assert!(!text.contains("LANGUAGES"));
        assert!(!text.contains("CERTIFICATIONS"));
        assert!(!text.contains("REFERENCES"));
    }
}
