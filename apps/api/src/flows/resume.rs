//! Resume builder: structured form fields in, Markdown resume out.

use serde::{Deserialize, Serialize};

use super::prompts::{fill, CREATE_RESUME_PROMPT_TEMPLATE};
use super::Flow;
use crate::llm_client::prompts::MARKDOWN_SUBSET_INSTRUCTION;
use crate::validation::{FieldErrors, Validate};

const MIN_SUMMARY_CHARS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub job_title: String,
    pub company: String,
    pub dates: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub dates: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResumeInput {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    pub professional_summary: String,
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
}

impl Validate for CreateResumeInput {
    fn validate_into(&self, errors: &mut FieldErrors) {
        errors.required("fullName", &self.full_name, "Full name is required.");
        errors.email("email", &self.email);
        errors.required("phone", &self.phone, "Phone number is required.");
        errors.min_chars(
            "professionalSummary",
            &self.professional_summary,
            MIN_SUMMARY_CHARS,
            "Summary should be at least 10 characters.",
        );
        if self.skills.iter().all(|s| s.trim().is_empty()) {
            errors.push("skills", "Please list at least one skill.");
        }

        for (i, job) in self.experience.iter().enumerate() {
            let field = |name: &str| format!("experience[{i}].{name}");
            errors.required(&field("jobTitle"), &job.job_title, "Job title is required");
            errors.required(&field("company"), &job.company, "Company is required");
            errors.required(&field("dates"), &job.dates, "Dates are required");
            errors.required(&field("description"), &job.description, "Description is required");
        }
        for (i, edu) in self.education.iter().enumerate() {
            let field = |name: &str| format!("education[{i}].{name}");
            errors.required(&field("degree"), &edu.degree, "Degree is required");
            errors.required(&field("school"), &edu.school, "School is required");
            errors.required(&field("dates"), &edu.dates, "Dates are required");
        }
        for (i, project) in self.projects.iter().enumerate() {
            let field = |name: &str| format!("projects[{i}].{name}");
            errors.required(&field("name"), &project.name, "Project name is required");
            errors.required(
                &field("description"),
                &project.description,
                "Description is required",
            );
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResumeOutput {
    pub generated_resume_md: String,
}

impl Validate for CreateResumeOutput {
    fn validate_into(&self, errors: &mut FieldErrors) {
        errors.required("generatedResumeMd", &self.generated_resume_md, "must not be empty");
    }
}

/// Writes a fresh resume from the builder form.
pub struct CreateResume;

impl Flow for CreateResume {
    const NAME: &'static str = "create_resume";
    type Input = CreateResumeInput;
    type Output = CreateResumeOutput;

    fn prompt(input: &CreateResumeInput) -> String {
        let user_information = user_information(input);
        fill(
            CREATE_RESUME_PROMPT_TEMPLATE,
            &[
                ("markdown_subset", MARKDOWN_SUBSET_INSTRUCTION),
                ("user_information", &user_information),
            ],
        )
    }
}

/// Flattens the form into labelled plain-text blocks for the prompt.
fn user_information(input: &CreateResumeInput) -> String {
    let mut out = vec![
        format!("Full Name: {}", input.full_name.trim()),
        format!("Email: {}", input.email.trim()),
        format!("Phone: {}", input.phone.trim()),
    ];
    if let Some(linkedin) = input.linkedin.as_deref().filter(|l| !l.trim().is_empty()) {
        out.push(format!("LinkedIn: {}", linkedin.trim()));
    }
    out.push(format!("Summary: {}", input.professional_summary.trim()));
    out.push(format!("Skills: {}", input.skills.join(", ")));

    if !input.experience.is_empty() {
        out.push("\nExperience:".to_string());
        for job in &input.experience {
            out.push(format!(
                "- Job Title: {}\n  Company: {}\n  Dates: {}\n  Description: {}",
                job.job_title, job.company, job.dates, job.description
            ));
        }
    }
    if !input.education.is_empty() {
        out.push("\nEducation:".to_string());
        for edu in &input.education {
            out.push(format!(
                "- Degree: {}\n  School: {}\n  Dates: {}",
                edu.degree, edu.school, edu.dates
            ));
        }
    }
    if !input.projects.is_empty() {
        out.push("\nProjects:".to_string());
        for project in &input.projects {
            let mut block = format!(
                "- Project Name: {}\n  Description: {}",
                project.name, project.description
            );
            if let Some(url) = project.url.as_deref().filter(|u| !u.trim().is_empty()) {
                block.push_str(&format!("\n  URL: {url}"));
            }
            out.push(block);
        }
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::flows::execute;
    use crate::llm_client::testing::StubBackend;

    fn form() -> CreateResumeInput {
        CreateResumeInput {
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+7 700 000 0000".to_string(),
            linkedin: None,
            professional_summary: "Backend engineer who likes hard problems.".to_string(),
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            experience: vec![ExperienceEntry {
                job_title: "Engineer".to_string(),
                company: "Acme".to_string(),
                dates: "2020 - Present".to_string(),
                description: "Built the billing pipeline.".to_string(),
            }],
            education: Vec::new(),
            projects: vec![ProjectEntry {
                name: "ledger".to_string(),
                description: "Double-entry bookkeeping library.".to_string(),
                url: Some("https://github.com/jane/ledger".to_string()),
            }],
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn test_nested_entries_report_indexed_fields() {
        let mut input = form();
        input.email = "jane".to_string();
        input.skills = vec!["  ".to_string()];
        input.experience[0].company = String::new();
        input.education.push(EducationEntry {
            degree: "BSc".to_string(),
            school: String::new(),
            dates: "2016".to_string(),
        });

        let Err(AppError::InvalidFields(fields)) = input.validate() else {
            panic!("expected field errors");
        };
        let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(
            names,
            vec!["email", "skills", "experience[0].company", "education[0].school"]
        );
    }

    #[test]
    fn test_user_information_skips_empty_optionals() {
        let info = user_information(&form());
        assert!(info.contains("Skills: Rust, SQL"));
        assert!(info.contains("URL: https://github.com/jane/ledger"));
        assert!(!info.contains("LinkedIn"));
        assert!(!info.contains("Education:"));
    }

    #[tokio::test]
    async fn test_create_resume_returns_markdown() {
        let reply = r##"{"generatedResumeMd":"# Jane Doe\n## Summary\nBackend engineer."}"##;
        let backend = StubBackend::replying(reply);
        let output = execute::<CreateResume>(&backend, &form()).await.unwrap();
        assert!(output.generated_resume_md.starts_with("# Jane Doe"));
        assert!(backend.prompts.lock().unwrap()[0].contains("Company: Acme"));
    }

    #[tokio::test]
    async fn test_empty_markdown_is_rejected() {
        let backend = StubBackend::replying(r#"{"generatedResumeMd":"  "}"#);
        let result = execute::<CreateResume>(&backend, &form()).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
