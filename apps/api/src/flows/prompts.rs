// All LLM prompt templates for the flows module.
// Reuses cross-cutting fragments from llm_client::prompts.
// Placeholders are `{name}` and are substituted by `fill` before sending.

/// Substitutes `{name}` slots in one pass over `template`.
///
/// Inserted values are never rescanned, so user text that looks like a slot
/// stays literal. Braces that do not name a known slot are kept as written.
pub fn fill(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            slots
                .iter()
                .find(|(slot, _)| *slot == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Tailoring prompt. Replace: {truthfulness}, {markdown_subset}, {language},
/// {job_description}, {resume_text}
pub const TAILOR_PROMPT_TEMPLATE: &str = r#"You are an expert career coach and technical editor.

Task: Rewrite the user's resume to best match the target job description.

Constraints:
- Extract contact information (name, email, phone, links) and place it at the top.
- {truthfulness}
- Emphasize relevant hard skills, tools, and impact (metrics if present).
- Remove or downplay irrelevant content.
- Adjust tone for recruiters: concise, bullet-based, action verbs.

{markdown_subset}

Return a JSON object with this EXACT schema (no extra fields):
{
  "tailoredMd": "... (Markdown resume with sections: Contact Information, Summary, Skills, Experience, Projects, Education) ...",
  "changeLog": ["...what changed and why..."],
  "matchScore": 0-100,
  "scoreRationale": "2-4 sentences on strengths/gaps"
}

LANGUAGE: {language}

JOB DESCRIPTION:
{job_description}

ORIGINAL RESUME:
{resume_text}

Rewrite now."#;

/// Match-score prompt. Replace: {language}, {job_description}, {resume_text}
pub const MATCH_SCORE_PROMPT_TEMPLATE: &str = r#"You are an expert career coach.

Task: Evaluate how well the user's resume matches the target job description.

Return a JSON object with this EXACT schema (no extra fields):
{
  "matchScore": 0-100,
  "scoreRationale": "2-4 sentences on strengths/gaps"
}

LANGUAGE: {language}

JOB DESCRIPTION:
{job_description}

ORIGINAL RESUME:
{resume_text}

Evaluate now. Give a match score and rationale."#;

/// Resume-builder prompt. Replace: {markdown_subset}, {user_information}
pub const CREATE_RESUME_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer. Create a professional, well-formatted resume in Markdown based on the structured information provided by the user.

Follow this structure precisely:
1. Contact Information: At the very top, the Full Name as a main heading (#), followed by Email, Phone, and LinkedIn profile URL on separate lines.
2. Summary: A section titled '## Summary' containing the professional summary.
3. Skills: A section titled '## Skills' containing a comma-separated list of skills.
4. Experience: (Only if provided) A section titled '## Experience'. For each job, a sub-heading (###) with the Job Title and Company. On the next line, the dates. Below that, bullet points for each item in the description.
5. Education: (Only if provided) A section titled '## Education'. For each entry, a sub-heading (###) with the Degree and School. On the next line, the dates.
6. Projects: (Only if provided) A section titled '## Projects'. For each project, a sub-heading (###) with the Project Name. Below that, bullet points for the description and the URL if available.

{markdown_subset}

Return a JSON object with this EXACT schema (no extra fields):
{
  "generatedResumeMd": "the complete Markdown resume"
}

USER INFORMATION:
{user_information}

Generate the Markdown resume now."#;

/// Career recommendation prompt. Replace: {interests}
pub const RECOMMEND_CAREERS_PROMPT_TEMPLATE: &str = r#"You are an expert career advisor for students.

Recommend 3-5 potential career paths based on the student's stated interests.
For each recommendation, provide a compelling 2-4 sentence rationale in Markdown explaining how it connects to their passions.

Return a JSON object with this EXACT schema (no extra fields):
{
  "recommendations": [
    {"careerName": "Game Designer", "rationale": "..."}
  ]
}

USER'S INTERESTS:
{interests}

Generate the recommendations now."#;

/// Development plan prompt. Replace: {career_name}, {markdown_subset}
pub const DEVELOPMENT_PLAN_PROMPT_TEMPLATE: &str = r#"You are an expert career coach creating a plan for a student interested in pursuing a career as a {career_name}.

Generate a concise, actionable 3-month personal development plan in Markdown with these sections:
## Month 1: Foundational Skills
## Month 2: Practical Application
## Month 3: Specialization and Portfolio Building

For each month, include:
- **Key Skills:** a bulleted list of 3-4 essential skills to focus on.
- **Project Idea:** a simple, practical project idea to apply the learned skills.
- **Google Resources:** a bulleted list of 1-2 relevant courses, certificates, or learning materials from Google. You MUST include a valid, clickable markdown link ([Course Name](https://...)) for each resource.

Keep the descriptions brief and to the point.

{markdown_subset}

Return a JSON object with this EXACT schema (no extra fields):
{
  "developmentPlanMd": "the Markdown plan"
}

CAREER: {career_name}

Generate the 3-month development plan now."#;

/// Mock-interview turn prompt. Replace: {job_role}, {chat_history}, {question}, {answer}
pub const PRACTICE_INTERVIEW_PROMPT_TEMPLATE: &str = r#"You are an expert interviewer conducting a mock interview for a student.

Job Role: {job_role}

Conversation History:
{chat_history}

Current Question: {question}
User's Answer: {answer}

INSTRUCTIONS:
1. If the question is "START", this is the beginning of the interview. Do not provide feedback (use an empty string). Generate a relevant opening question.
2. If there is a user answer, provide constructive feedback in Markdown, with one bullet point per area:
   - **Clarity and Conciseness:** Was the answer easy to understand?
   - **Relevance:** Did the answer directly address the question?
   - **Structure (STAR method):** Did the user describe the Situation, Task, Action, and Result?
   - **Impact:** Did the user quantify their achievements?
   - **Soft Skills:** Assess the tone for confidence and professionalism.
3. Then generate the next logical interview question, following a natural interview progression.
4. Do not repeat questions that are already in the conversation history.

Return a JSON object with this EXACT schema (no extra fields):
{
  "feedback": "Markdown feedback, or an empty string for the first question",
  "nextQuestion": "the next interview question"
}"#;

/// Interview summary prompt. Replace: {job_role}, {chat_history}, {markdown_subset}
pub const SUMMARIZE_INTERVIEW_PROMPT_TEMPLATE: &str = r#"You are an expert career coach reviewing a mock interview transcript.

Job Role: {job_role}

Interview Transcript (JSON):
{chat_history}

Write a comprehensive summary of the candidate's performance in Markdown with these sections:
1. **Overall Performance:** a brief paragraph highlighting the candidate's strengths.
2. **Areas for Improvement:** a bulleted list of the top 3-4 most critical areas, each with a specific, actionable tip.
3. A section titled '### Recommended Courses to Help You Improve' with 2-3 specific online courses addressing the weaknesses. You MUST provide a valid, clickable markdown link for each course.

{markdown_subset}

Return a JSON object with this EXACT schema (no extra fields):
{
  "summary": "the Markdown summary"
}"#;
