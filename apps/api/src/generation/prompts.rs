// All LLM prompt constants for the generation pipeline.
// Two call shapes share one transport: analysis-style (match analyzer) and
// composition-style (bullet selector, composer, customizer).

/// System prompt for the resume/JD match analysis call.
pub const MATCH_ANALYSIS_SYSTEM: &str = "You are an expert recruiter and career advisor. \
    Analyze how well the candidate's resume matches the job description.\n\n\
    Provide:\n\
    1. Match percentage (0-100%)\n\
    2. Top 5 matching qualifications\n\
    3. Top 3 gaps or areas for improvement\n\
    4. 3 specific bullet points from the resume that should be highlighted\n\n\
    Be constructive and specific in your analysis.";

/// Match analysis data message. Replace `{resume_text}` and `{job_description}`.
pub const MATCH_ANALYSIS_PROMPT_TEMPLATE: &str = r#"RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Please analyze the match between this resume and job description."#;

/// System prompt for the bullet selection call. The response is parsed by
/// leading bullet marker — lines without one are dropped.
pub const BULLET_SELECTION_SYSTEM: &str = "You are an expert at identifying the most relevant \
    experience bullets from a resume for a specific job application.\n\n\
    Extract 5-8 of the most relevant bullet points from the resume that align \
    with the job description. Focus on:\n\
    - Quantifiable achievements\n\
    - Relevant technical skills\n\
    - Leadership experience\n\
    - Projects that match the job requirements\n\n\
    Return only the bullet points, one per line, starting with \u{2022}";

/// Bullet selection data message. Replace `{resume_text}` and `{job_description}`.
pub const BULLET_SELECTION_PROMPT_TEMPLATE: &str = r#"RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Extract the most relevant bullet points:"#;

/// System prompt for cover letter composition.
pub const COVER_LETTER_SYSTEM: &str = "You are an expert cover letter writer who creates \
    compelling, personalized cover letters that get results.\n\n\
    Write a professional cover letter that:\n\
    1. Has a strong, engaging opening paragraph\n\
    2. Incorporates specific achievements from the resume\n\
    3. Addresses the job requirements directly\n\
    4. Shows genuine interest in the company\n\
    5. Has a confident, professional closing\n\
    6. Is 3-4 paragraphs long\n\
    7. Uses active voice and quantifiable achievements\n\n\
    Do NOT use generic templates. Make it personal and specific.\n\
    Include the candidate's name as [Your Name] and company details as provided.";

/// Cover letter composition data message.
/// Replace: {job_description}, {company_name}, {company_context}, {bullets},
/// {resume_text}. `{company_context}` is empty or a pre-formatted research block.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"JOB DESCRIPTION:
{job_description}

COMPANY: {company_name}{company_context}

CANDIDATE'S RELEVANT ACHIEVEMENTS:
{bullets}

FULL RESUME CONTEXT:
{resume_text}

Write a compelling cover letter for this application:"#;

/// System prompt for the company customization pass.
pub const CUSTOMIZE_SYSTEM: &str = "You are tasked with enhancing a cover letter \
    by incorporating specific company information.\n\n\
    Add 1-2 sentences that show you've researched the company and explain \
    why you're specifically interested in working there.\n\n\
    Integrate this naturally into the existing cover letter without making it \
    longer than 4 paragraphs.";

/// Customization data message. Replace `{cover_letter}` and `{company_brief}`.
pub const CUSTOMIZE_PROMPT_TEMPLATE: &str = r#"CURRENT COVER LETTER:
{cover_letter}

COMPANY INFORMATION:
{company_brief}

Enhance the cover letter with this company information:"#;
