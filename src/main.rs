mod ai;
mod export;
mod models;
mod render;
mod store;
mod tui;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use ai::GeminiProvider;
use models::{EducationPatch, PersonalInfoPatch, WorkExperiencePatch};
use render::{DisplaySettings, Template};
use store::{NewCertification, NewEducation, NewReference, NewWorkExperience, Store};

#[derive(Parser)]
#[command(name = "vitae")]
#[command(about = "Resume builder - edit, version, preview, and export your resume")]
struct Cli {
    /// Path to the state file (defaults to the user data directory)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the resume store with the starter document
    Init,

    /// Show an overview of the current resume
    Show,

    /// Open the interactive builder (preview, templates, versions)
    Edit,

    /// Update personal information
    Personal {
        #[command(subcommand)]
        command: PersonalCommands,
    },

    /// Replace the professional summary
    Summary {
        /// New summary text
        text: String,
    },

    /// Manage work experience entries
    Exp {
        #[command(subcommand)]
        command: ExpCommands,
    },

    /// Manage education entries
    Edu {
        #[command(subcommand)]
        command: EduCommands,
    },

    /// Manage skills
    Skill {
        #[command(subcommand)]
        command: SkillCommands,
    },

    /// Manage languages
    Lang {
        #[command(subcommand)]
        command: LangCommands,
    },

    /// Manage certifications
    Cert {
        #[command(subcommand)]
        command: CertCommands,
    },

    /// Manage references
    Ref {
        #[command(subcommand)]
        command: RefCommands,
    },

    /// Select or list resume templates
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },

    /// Save, load, list, or delete named versions
    Version {
        #[command(subcommand)]
        command: VersionCommands,
    },

    /// Render the resume to the terminal
    Render {
        /// Template to render with (defaults to the selected one)
        #[arg(short, long)]
        template: Option<String>,

        /// Render the plain ATS view instead of a template
        #[arg(long)]
        ats: bool,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// AI-assisted content generation
    Ai {
        #[command(subcommand)]
        command: AiCommands,
    },

    /// Export the resume
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },

    /// Import a previously exported JSON backup
    Import {
        /// Path to the JSON export
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum PersonalCommands {
    /// Set personal info fields (only given fields change)
    Set {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        linkedin: Option<String>,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        twitter: Option<String>,
        #[arg(long)]
        github: Option<String>,
    },

    /// Set the profile picture URI (empty string clears it)
    Picture {
        uri: String,
    },
}

#[derive(Subcommand)]
enum ExpCommands {
    /// Add a work experience entry (appended last)
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        company: String,
        #[arg(long)]
        start: String,
        #[arg(long, default_value = "Present")]
        end: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Bullet point (repeatable)
        #[arg(long = "bullet")]
        bullets: Vec<String>,
    },

    /// Update fields of an entry by id
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Replace all bullets (repeatable)
        #[arg(long = "bullet")]
        bullets: Vec<String>,
    },

    /// Remove an entry by id
    Remove { id: String },

    /// Move an entry one position up
    Up { id: String },

    /// Move an entry one position down
    Down { id: String },

    /// List entries in display order
    List,
}

#[derive(Subcommand)]
enum EduCommands {
    /// Add an education entry
    Add {
        #[arg(long)]
        degree: String,
        #[arg(long)]
        institution: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// Update fields of an entry by id
    Update {
        id: String,
        #[arg(long)]
        degree: Option<String>,
        #[arg(long)]
        institution: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Remove an entry by id
    Remove { id: String },

    /// List entries
    List,
}

#[derive(Subcommand)]
enum SkillCommands {
    /// Add a skill tag
    Add { skill: String },
    /// Remove a skill by value
    Remove { skill: String },
    /// List skills
    List,
}

#[derive(Subcommand)]
enum LangCommands {
    /// Add a language with proficiency
    Add {
        language: String,
        proficiency: String,
    },
    /// Remove a language by name
    Remove { language: String },
    /// List languages
    List,
}

#[derive(Subcommand)]
enum CertCommands {
    /// Add a certification
    Add {
        name: String,
        issuer: String,
        date: String,
    },
    /// Remove a certification by id
    Remove { id: String },
    /// List certifications
    List,
}

#[derive(Subcommand)]
enum RefCommands {
    /// Add a reference
    Add {
        name: String,
        position: String,
        company: String,
        contact: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Remove a reference by id
    Remove { id: String },
    /// List references
    List,
}

#[derive(Subcommand)]
enum TemplateCommands {
    /// Select a template by id
    Set { id: String },
    /// List available templates
    List,
}

#[derive(Subcommand)]
enum VersionCommands {
    /// Snapshot the current document and template under a name
    Save { name: String },
    /// Restore a saved version into the live document
    Load { id: String },
    /// Delete a saved version
    Delete { id: String },
    /// List saved versions
    List,
}

#[derive(Subcommand)]
enum AiCommands {
    /// Generate a professional summary
    Summary {
        /// Job title to write the summary for
        title: String,
        /// Industry context
        #[arg(long, default_value = "technology")]
        industry: String,
        /// Years of experience
        #[arg(long)]
        years: u32,
        /// Write the result into the resume summary
        #[arg(long)]
        apply: bool,
    },

    /// Generate bullet points for a position
    Bullets {
        /// Job title to generate bullets for
        title: String,
        #[arg(long, default_value = "technology")]
        industry: String,
        /// Append the bullets to the work experience entry with this id
        #[arg(long)]
        exp: Option<String>,
    },

    /// Improve a single bullet point
    Improve {
        /// The bullet point text
        bullet: String,
        /// Strategy: concise, metrics, action, or results
        #[arg(long, default_value = "concise")]
        strategy: String,
    },

    /// Analyze a job description against your resume
    Analyze {
        /// Job description text (or use --file)
        description: Option<String>,
        /// Read the job description from a file
        #[arg(long)]
        from_file: Option<PathBuf>,
    },

    /// Generate a cover letter from your resume
    CoverLetter {
        /// Position applied for
        position: String,
        /// Company name
        #[arg(long)]
        company: Option<String>,
    },
}

#[derive(Subcommand)]
enum ExportCommands {
    /// Export a paginated A4 PDF (requires typst)
    Pdf {
        #[arg(short, long, default_value = "resume.pdf")]
        output: PathBuf,

        /// Template to render with (defaults to the selected one)
        #[arg(short, long)]
        template: Option<String>,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Export a plain-text resume
    Text {
        #[arg(short, long, default_value = "resume.txt")]
        output: PathBuf,
    },

    /// Export a JSON backup (document + template + export date)
    Json {
        #[arg(short, long, default_value = "resume.json")]
        output: PathBuf,
    },

    /// Create a mock shareable link
    Link,
}

/// Rendering knobs shared by `render` and `export pdf`. These never touch
/// the stored document.
#[derive(Args)]
struct DisplayArgs {
    /// Font scale (1.0 = default)
    #[arg(long, default_value_t = 1.0)]
    font_size: f64,

    /// Line spacing factor (1.0 = single)
    #[arg(long, default_value_t = 1.0)]
    line_spacing: f64,

    /// Font family: sans, serif, mono, or a typst font name
    #[arg(long, default_value = "sans")]
    font_family: String,

    #[arg(long)]
    hide_picture: bool,
    #[arg(long)]
    hide_references: bool,
    #[arg(long)]
    hide_certifications: bool,
    #[arg(long)]
    hide_languages: bool,
}

impl DisplayArgs {
    fn to_settings(&self) -> DisplaySettings {
        DisplaySettings {
            font_size: self.font_size,
            line_spacing: self.line_spacing,
            font_family: self.font_family.clone(),
            show_profile_picture: !self.hide_picture,
            show_references: !self.hide_references,
            show_certifications: !self.hide_certifications,
            show_languages: !self.hide_languages,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut store = match &cli.file {
        Some(path) => Store::open_at(path)?,
        None => Store::open()?,
    };

    match cli.command {
        Commands::Init => {
            println!("Resume store ready at {}", store.path().display());
            println!(
                "Starter document: {} {} ({})",
                store.data().personal_info.first_name,
                store.data().personal_info.last_name,
                store.data().personal_info.title
            );
        }

        Commands::Show => {
            let data = store.data();
            println!(
                "{} {} — {}",
                data.personal_info.first_name, data.personal_info.last_name, data.personal_info.title
            );
            println!(
                "{} | {} | {}",
                data.personal_info.email, data.personal_info.phone, data.personal_info.location
            );
            println!();
            println!("Template:       {}", store.template());
            println!("Experience:     {}", data.work_experience.len());
            println!("Education:      {}", data.education.len());
            println!("Skills:         {}", data.skills.len());
            println!("Languages:      {}", data.languages.len());
            println!("Certifications: {}", data.certifications.len());
            println!("References:     {}", data.references.len());
            println!("Saved versions: {}", store.versions().len());
            println!();
            println!("State file: {}", store.path().display());
        }

        Commands::Edit => {
            tui::run_builder(&mut store)?;
        }

        Commands::Personal { command } => match command {
            PersonalCommands::Set {
                first_name,
                last_name,
                title,
                email,
                phone,
                location,
                linkedin,
                website,
                twitter,
                github,
            } => {
                store.update_personal_info(PersonalInfoPatch {
                    first_name,
                    last_name,
                    title,
                    email,
                    phone,
                    location,
                    linkedin,
                    website,
                    twitter,
                    github,
                })?;
                println!("Updated personal info.");
            }

            PersonalCommands::Picture { uri } => {
                store.set_profile_picture(&uri)?;
                if uri.is_empty() {
                    println!("Cleared profile picture.");
                } else {
                    println!("Set profile picture: {uri}");
                }
            }
        },

        Commands::Summary { text } => {
            store.update_summary(&text)?;
            println!("Updated summary.");
        }

        Commands::Exp { command } => match command {
            ExpCommands::Add {
                title,
                company,
                start,
                end,
                description,
                bullets,
            } => {
                if title.trim().is_empty() || company.trim().is_empty() {
                    println!("Title and company are required.");
                    return Ok(());
                }
                let id = store.add_work_experience(NewWorkExperience {
                    title,
                    company,
                    start_date: start,
                    end_date: end,
                    description,
                    bullets,
                })?;
                println!("Added experience #{id}");
            }

            ExpCommands::Update {
                id,
                title,
                company,
                start,
                end,
                description,
                bullets,
            } => {
                store.update_work_experience(
                    &id,
                    WorkExperiencePatch {
                        title,
                        company,
                        start_date: start,
                        end_date: end,
                        description,
                        bullets: if bullets.is_empty() { None } else { Some(bullets) },
                    },
                )?;
                println!("Updated experience #{id}");
            }

            ExpCommands::Remove { id } => {
                store.remove_work_experience(&id)?;
                println!("Removed experience #{id}");
            }

            ExpCommands::Up { id } => {
                store.move_work_experience_up(&id)?;
                println!("Moved experience #{id} up.");
            }

            ExpCommands::Down { id } => {
                store.move_work_experience_down(&id)?;
                println!("Moved experience #{id} down.");
            }

            ExpCommands::List => {
                let entries = &store.data().work_experience;
                if entries.is_empty() {
                    println!("No work experience entries.");
                } else {
                    println!(
                        "{:<16} {:<28} {:<22} {:<20}",
                        "ID", "TITLE", "COMPANY", "DATES"
                    );
                    println!("{}", "-".repeat(88));
                    for exp in entries {
                        println!(
                            "{:<16} {:<28} {:<22} {:<20}",
                            exp.id,
                            truncate(&exp.title, 26),
                            truncate(&exp.company, 20),
                            format!("{} - {}", exp.start_date, exp.end_date)
                        );
                    }
                }
            }
        },

        Commands::Edu { command } => match command {
            EduCommands::Add {
                degree,
                institution,
                start,
                end,
                description,
            } => {
                if degree.trim().is_empty() || institution.trim().is_empty() {
                    println!("Degree and institution are required.");
                    return Ok(());
                }
                let id = store.add_education(NewEducation {
                    degree,
                    institution,
                    start_date: start,
                    end_date: end,
                    description,
                })?;
                println!("Added education #{id}");
            }

            EduCommands::Update {
                id,
                degree,
                institution,
                start,
                end,
                description,
            } => {
                store.update_education(
                    &id,
                    EducationPatch {
                        degree,
                        institution,
                        start_date: start,
                        end_date: end,
                        description,
                    },
                )?;
                println!("Updated education #{id}");
            }

            EduCommands::Remove { id } => {
                store.remove_education(&id)?;
                println!("Removed education #{id}");
            }

            EduCommands::List => {
                let entries = &store.data().education;
                if entries.is_empty() {
                    println!("No education entries.");
                } else {
                    println!("{:<16} {:<34} {:<30}", "ID", "DEGREE", "INSTITUTION");
                    println!("{}", "-".repeat(80));
                    for edu in entries {
                        println!(
                            "{:<16} {:<34} {:<30}",
                            edu.id,
                            truncate(&edu.degree, 32),
                            truncate(&edu.institution, 28)
                        );
                    }
                }
            }
        },

        Commands::Skill { command } => match command {
            SkillCommands::Add { skill } => {
                if skill.trim().is_empty() {
                    println!("Skill cannot be empty.");
                    return Ok(());
                }
                store.add_skill(&skill)?;
                println!("Added skill '{skill}'");
            }
            SkillCommands::Remove { skill } => {
                store.remove_skill(&skill)?;
                println!("Removed skill '{skill}'");
            }
            SkillCommands::List => {
                if store.data().skills.is_empty() {
                    println!("No skills.");
                } else {
                    for skill in &store.data().skills {
                        println!("{skill}");
                    }
                }
            }
        },

        Commands::Lang { command } => match command {
            LangCommands::Add {
                language,
                proficiency,
            } => {
                if language.trim().is_empty() {
                    println!("Language cannot be empty.");
                    return Ok(());
                }
                store.add_language(&language, &proficiency)?;
                println!("Added language '{language}' ({proficiency})");
            }
            LangCommands::Remove { language } => {
                store.remove_language(&language)?;
                println!("Removed language '{language}'");
            }
            LangCommands::List => {
                if store.data().languages.is_empty() {
                    println!("No languages.");
                } else {
                    for lang in &store.data().languages {
                        println!("{}: {}", lang.language, lang.proficiency);
                    }
                }
            }
        },

        Commands::Cert { command } => match command {
            CertCommands::Add { name, issuer, date } => {
                if name.trim().is_empty() || issuer.trim().is_empty() {
                    println!("Certification name and issuer are required.");
                    return Ok(());
                }
                let id = store.add_certification(NewCertification { name, issuer, date })?;
                println!("Added certification #{id}");
            }
            CertCommands::Remove { id } => {
                store.remove_certification(&id)?;
                println!("Removed certification #{id}");
            }
            CertCommands::List => {
                let certs = &store.data().certifications;
                if certs.is_empty() {
                    println!("No certifications.");
                } else {
                    println!("{:<16} {:<40} {:<24}", "ID", "NAME", "ISSUER");
                    println!("{}", "-".repeat(80));
                    for cert in certs {
                        println!(
                            "{:<16} {:<40} {:<24}",
                            cert.id,
                            truncate(&cert.name, 38),
                            truncate(&cert.issuer, 22)
                        );
                    }
                }
            }
        },

        Commands::Ref { command } => match command {
            RefCommands::Add {
                name,
                position,
                company,
                contact,
                phone,
            } => {
                if name.trim().is_empty() || contact.trim().is_empty() {
                    println!("Reference name and contact are required.");
                    return Ok(());
                }
                let id = store.add_reference(NewReference {
                    name,
                    position,
                    company,
                    contact,
                    phone,
                })?;
                println!("Added reference #{id}");
            }
            RefCommands::Remove { id } => {
                store.remove_reference(&id)?;
                println!("Removed reference #{id}");
            }
            RefCommands::List => {
                let refs = &store.data().references;
                if refs.is_empty() {
                    println!("No references.");
                } else {
                    println!("{:<16} {:<24} {:<24} {:<24}", "ID", "NAME", "POSITION", "CONTACT");
                    println!("{}", "-".repeat(88));
                    for reference in refs {
                        println!(
                            "{:<16} {:<24} {:<24} {:<24}",
                            reference.id,
                            truncate(&reference.name, 22),
                            truncate(&reference.position, 22),
                            truncate(&reference.contact, 22)
                        );
                    }
                }
            }
        },

        Commands::Template { command } => match command {
            TemplateCommands::Set { id } => {
                store.set_template(&id)?;
                if Template::parse(&id).id() != id {
                    println!(
                        "Selected template '{id}' (unrecognized; rendering will fall back to modern)"
                    );
                } else {
                    println!("Selected template '{id}'");
                }
            }
            TemplateCommands::List => {
                let current = store.template();
                for template in Template::all() {
                    let marker = if template.id() == current { "*" } else { " " };
                    println!("{marker} {}", template.id());
                }
            }
        },

        Commands::Version { command } => match command {
            VersionCommands::Save { name } => {
                if name.trim().is_empty() {
                    println!("Version name is required.");
                    return Ok(());
                }
                let id = store.save_version(&name)?;
                println!("Saved version '{name}' (ID: {id})");
            }

            VersionCommands::Load { id } => {
                if store.load_version(&id)? {
                    println!("Loaded version #{id}");
                } else {
                    println!("Version #{id} not found.");
                }
            }

            VersionCommands::Delete { id } => {
                store.delete_version(&id)?;
                println!("Deleted version #{id}");
            }

            VersionCommands::List => {
                let versions = store.versions();
                if versions.is_empty() {
                    println!("No saved versions.");
                } else {
                    println!("{:<16} {:<24} {:<14} {:<26}", "ID", "NAME", "TEMPLATE", "DATE");
                    println!("{}", "-".repeat(80));
                    for version in versions {
                        println!(
                            "{:<16} {:<24} {:<14} {:<26}",
                            version.id,
                            truncate(&version.name, 22),
                            version.template,
                            truncate(&version.date, 24)
                        );
                    }
                }
            }
        },

        Commands::Render {
            template,
            ats,
            display,
        } => {
            let lines = if ats {
                render::render_ats(store.data())
            } else {
                let template = Template::parse(template.as_deref().unwrap_or(store.template()));
                render::render(template, store.data(), &display.to_settings())
            };
            for line in lines {
                println!("{line}");
            }
        }

        Commands::Ai { command } => {
            let provider = GeminiProvider::new()?;
            match command {
                AiCommands::Summary {
                    title,
                    industry,
                    years,
                    apply,
                } => {
                    let summary = ai::generate_summary(&provider, &title, &industry, years);
                    println!("{summary}");
                    if apply {
                        store.update_summary(&summary)?;
                        println!("\n(Applied to resume summary)");
                    }
                }

                AiCommands::Bullets {
                    title,
                    industry,
                    exp,
                } => {
                    let bullets = ai::generate_bullet_points(&provider, &title, &industry);
                    for bullet in &bullets {
                        println!("• {bullet}");
                    }
                    if let Some(exp_id) = exp {
                        let existing = store
                            .data()
                            .work_experience
                            .iter()
                            .find(|e| e.id == exp_id)
                            .map(|e| e.bullets.clone());
                        match existing {
                            Some(mut all) => {
                                all.extend(bullets);
                                store.update_work_experience(
                                    &exp_id,
                                    WorkExperiencePatch {
                                        bullets: Some(all),
                                        ..Default::default()
                                    },
                                )?;
                                println!("\n(Appended to experience #{exp_id})");
                            }
                            None => println!("\nExperience #{exp_id} not found; bullets not applied."),
                        }
                    }
                }

                AiCommands::Improve { bullet, strategy } => {
                    let Some(strategy) = ai::ImproveStrategy::parse(&strategy) else {
                        println!(
                            "Unknown strategy '{strategy}'. Use concise, metrics, action, or results."
                        );
                        return Ok(());
                    };
                    let improved = ai::improve_bullet_point(&provider, &bullet, strategy);
                    println!("{improved}");
                }

                AiCommands::Analyze {
                    description,
                    from_file,
                } => {
                    let text = match (description, from_file) {
                        (Some(text), _) => text,
                        (None, Some(path)) => std::fs::read_to_string(&path).with_context(|| {
                            format!("Failed to read job description: {}", path.display())
                        })?,
                        (None, None) => {
                            return Err(anyhow!(
                                "Provide a job description as an argument or via --from-file"
                            ))
                        }
                    };

                    let analysis = ai::analyze_job_description(&provider, &text);
                    println!("Industry:            {}", analysis.industry);
                    println!("Compatibility score: {}%", analysis.compatibility_score);
                    println!("Found keywords:      {}", analysis.found_keywords.join(", "));
                    println!("Missing keywords:    {}", analysis.missing_keywords.join(", "));
                    println!("Suggested skills:    {}", analysis.suggested_skills.join(", "));
                }

                AiCommands::CoverLetter { position, company } => {
                    let info = &store.data().personal_info;
                    let name = format!("{} {}", info.first_name, info.last_name);
                    let letter = ai::generate_cover_letter(
                        &provider,
                        &name,
                        &position,
                        company.as_deref(),
                        &store.data().skills,
                    );
                    println!("{letter}");
                }
            }
        }

        Commands::Export { command } => match command {
            ExportCommands::Pdf {
                output,
                template,
                display,
            } => {
                let template = Template::parse(template.as_deref().unwrap_or(store.template()));
                let pages =
                    export::export_pdf(store.data(), template, &display.to_settings(), &output)?;
                println!(
                    "Exported {} page{} to {}",
                    pages,
                    if pages == 1 { "" } else { "s" },
                    output.display()
                );
            }

            ExportCommands::Text { output } => {
                export::export_text(store.data(), &output)?;
                println!("Exported text resume to {}", output.display());
            }

            ExportCommands::Json { output } => {
                export::export_json(store.data(), store.template(), &output)?;
                println!("Exported JSON backup to {}", output.display());
            }

            ExportCommands::Link => {
                println!("{}", export::create_shareable_link());
                println!("(Mock link - nothing is uploaded; the URL does not resolve)");
            }
        },

        Commands::Import { file } => {
            let (data, template) = export::import_json(&file)?;
            store.replace(data, &template)?;
            println!("Imported resume from {}", file.display());
            println!("Template: {template}");
        }
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        // Cut on a char boundary; byte slicing panics on multibyte input.
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("Product Manager", 26), "Product Manager");
        assert_eq!(truncate("résumé", 10), "résumé");
    }

    #[test]
    fn test_truncate_long_string_gets_ellipsis() {
        let long = "Senior Product Manager for Platform";
        let out = truncate(long, 22);
        assert_eq!(out.chars().count(), 22);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_truncate_multibyte_cuts_on_char_boundary() {
        let degree = "Licence ès Lettres Modernes Appliquées";
        let out = truncate(degree, 22);
        assert_eq!(out.chars().count(), 22);
        assert!(out.ends_with("..."));

        let accented: String = "é".repeat(30);
        let out = truncate(&accented, 22);
        assert_eq!(out.chars().count(), 22);
        assert!(out.ends_with("..."));
    }
}
