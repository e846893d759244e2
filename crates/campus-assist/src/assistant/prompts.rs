use crate::channel::Channel;

/// Static campus facts embedded into generative prompts.
pub mod campus {
    pub const UNIVERSITY: &str = "Crestview University";
    pub const ASSISTANT_NAME: &str = "Thandi";
    pub const PROGRAMS: &[(&str, &str)] = &[
        ("Computer Science", "4 years"),
        ("Business Administration", "3 years"),
        ("Engineering", "4 years"),
        ("Liberal Arts", "3 years"),
    ];
    pub const APPLICATION_FEE: &str = "R500";
    pub const DEADLINES: &str = "December 15 (first semester), June 15 (second semester)";
    pub const REQUIRED_DOCUMENTS: &str =
        "SA Identity Document, Matric Certificate, Academic Transcripts, Motivation Letter";
    pub const FINANCIAL_AID: &str =
        "Merit Scholarships (R50,000), Need-based Bursaries (R30,000), Work-Study Programmes";
}

/// Prompt categories in selection priority order; the first matching
/// category wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryCategory {
    Help,
    CourseSteps,
    ApplicationSteps,
    UploadHelp,
    General,
}

/// A fully composed request for the generative model.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub text: String,
    pub max_tokens: u16,
    pub temperature: f32,
    pub category: QueryCategory,
}

const HELP_KEYWORDS: &[&str] = &["help", "what can you do"];

const APPLICATION_KEYWORDS: &[&str] = &[
    "application process",
    "how to apply",
    "registration process",
    "start application",
    "lets start",
    "begin application",
    "how can i start",
    "how do i start",
    "i want to apply",
    "just want to apply",
    "apply for it",
];

const UPLOAD_KEYWORDS: &[&str] = &["how to upload", "upload documents", "document upload"];

/// Maps a free-text query onto one of the fixed prompt templates.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(channel: Channel, utterance: &str, user_name: Option<&str>) -> Prompt {
        let lowered = utterance.to_lowercase();
        let category = Self::categorize(&lowered);
        let student = user_name.unwrap_or("the student");
        let policy = channel.policy();

        let text = match category {
            QueryCategory::Help => Self::help_prompt(utterance, student),
            QueryCategory::CourseSteps => match Self::mentioned_course(&lowered) {
                Some((course, duration)) => {
                    Self::course_prompt(utterance, student, course, duration)
                }
                None => Self::application_prompt(utterance, student),
            },
            QueryCategory::ApplicationSteps => Self::application_prompt(utterance, student),
            QueryCategory::UploadHelp => Self::upload_prompt(utterance, student),
            QueryCategory::General => Self::general_prompt(utterance, student),
        };

        Prompt {
            text,
            max_tokens: policy.prompt_token_budget,
            temperature: policy.temperature,
            category,
        }
    }

    fn categorize(lowered: &str) -> QueryCategory {
        if contains_any(lowered, HELP_KEYWORDS) {
            QueryCategory::Help
        } else if Self::mentioned_course(lowered).is_some() {
            QueryCategory::CourseSteps
        } else if contains_any(lowered, APPLICATION_KEYWORDS) {
            QueryCategory::ApplicationSteps
        } else if contains_any(lowered, UPLOAD_KEYWORDS) {
            QueryCategory::UploadHelp
        } else {
            QueryCategory::General
        }
    }

    fn mentioned_course(lowered: &str) -> Option<(&'static str, &'static str)> {
        campus::PROGRAMS
            .iter()
            .copied()
            .find(|(course, _)| lowered.contains(&course.to_lowercase()))
    }

    fn help_prompt(utterance: &str, student: &str) -> String {
        format!(
            "You are {}, an assistant for {} in South Africa. The user asked for help. \
             Provide a brief overview of what you can help with.\n\n\
             Available services:\n\
             - Course enrolment and programme information\n\
             - Admissions process and requirements\n\
             - Financial aid and funding applications\n\
             - Document upload and verification with AI analysis\n\
             - Application status checks\n\n\
             Keep the response helpful but concise. The user's name is {student}.\n\n\
             User: {utterance}",
            campus::ASSISTANT_NAME,
            campus::UNIVERSITY,
        )
    }

    fn course_prompt(utterance: &str, student: &str, course: &str, duration: &str) -> String {
        format!(
            "You are {}, an assistant for {}. The user wants to apply for {course} ({duration}). \
             Provide specific application steps for this programme.\n\n\
             Steps for {course}:\n\
             1. Complete the online application form\n\
             2. Pay the {} application fee\n\
             3. Upload required documents: {}\n\
             4. Wait for review (2-3 weeks)\n\n\
             Deadlines: {}\n\n\
             Be encouraging and helpful. The user's name is {student}.\n\n\
             User: {utterance}",
            campus::ASSISTANT_NAME,
            campus::UNIVERSITY,
            campus::APPLICATION_FEE,
            campus::REQUIRED_DOCUMENTS,
            campus::DEADLINES,
        )
    }

    fn application_prompt(utterance: &str, student: &str) -> String {
        format!(
            "You are {}, an assistant for {} in South Africa. The user wants to START their \
             application process.\n\n\
             Provide clear, direct steps to apply:\n\
             1. Choose your programme\n\
             2. Complete the online application form\n\
             3. Pay the {} application fee\n\
             4. Upload required documents: {}\n\
             5. Wait for review (2-3 weeks)\n\n\
             Application deadlines: {}\n\
             Financial aid available: {}\n\n\
             Be direct and actionable. The user's name is {student}.\n\n\
             User: {utterance}",
            campus::ASSISTANT_NAME,
            campus::UNIVERSITY,
            campus::APPLICATION_FEE,
            campus::REQUIRED_DOCUMENTS,
            campus::DEADLINES,
            campus::FINANCIAL_AID,
        )
    }

    fn upload_prompt(utterance: &str, student: &str) -> String {
        format!(
            "You are {}, an assistant for {}. The user needs help with uploading documents.\n\n\
             Explain the document upload process:\n\
             1. Use the \"Upload Documents\" button\n\
             2. Select your files ({})\n\
             3. The documents are analysed and verified automatically\n\
             4. You get instant feedback on verification status\n\
             5. Documents must be in your registered name for security\n\n\
             Keep the response clear and helpful. The user's name is {student}.\n\n\
             User: {utterance}",
            campus::ASSISTANT_NAME,
            campus::UNIVERSITY,
            campus::REQUIRED_DOCUMENTS,
        )
    }

    fn general_prompt(utterance: &str, student: &str) -> String {
        let programmes = campus::PROGRAMS
            .iter()
            .map(|(course, duration)| format!("{course} ({duration})"))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "You are {}, an assistant for {} in South Africa. The user's name is {student}.\n\n\
             {} details:\n\
             - Programmes: {programmes}\n\
             - Application fee: {}, Deadlines: {}\n\
             - Required documents: {}\n\
             - Financial aid: {}\n\n\
             Instructions:\n\
             - Do NOT introduce yourself unless it is the very first interaction\n\
             - Be conversational and natural\n\
             - Don't repeat information the user already knows\n\
             - Keep responses focused and helpful\n\
             - Use South African context (ZAR, Matric certificates)\n\n\
             User: {utterance}",
            campus::ASSISTANT_NAME,
            campus::UNIVERSITY,
            campus::UNIVERSITY,
            campus::APPLICATION_FEE,
            campus::DEADLINES,
            campus::REQUIRED_DOCUMENTS,
            campus::FINANCIAL_AID,
        )
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}
