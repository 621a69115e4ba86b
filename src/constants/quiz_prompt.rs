use crate::services::question_generator::GenerationRequest;

pub const QUESTION_RESPONSE_FORMAT: &str = r#"Format the response as JSON with the following structure:
{
  "question": "Your unique question here?",
  "options": ["Option A", "Option B", "Option C", "Option D"],
  "correctAnswer": 0,
  "explanation": "Brief explanation of why this is correct",
  "gradeLevel": "The grade level the question targets",
  "curriculum": "The curriculum the question follows, if any"
}

Respond with the JSON object only. Provide exactly four options and set "correctAnswer" to the zero-based index of the correct option."#;

pub fn build_question_prompt(request: &GenerationRequest) -> String {
    let mut subject = request.topic.clone();
    if let Some(subtopic) = &request.subtopic {
        subject.push_str(&format!(" (specifically: {})", subtopic));
    }

    let mut prompt = format!(
        "Generate a unique multiple choice question about {}.\n\
         The question should be different from typical questions and should test understanding.\n",
        subject
    );

    if let Some(grade_level) = &request.grade_level {
        prompt.push_str(&format!(
            "The question must be appropriate for students at the {} level.\n",
            grade_level
        ));
    }
    if let Some(curriculum) = &request.curriculum {
        prompt.push_str(&format!(
            "Frame the question according to the {} curriculum.\n",
            curriculum
        ));
    }

    prompt.push('\n');
    prompt.push_str(QUESTION_RESPONSE_FORMAT);
    prompt.push_str(
        "\n\nMake sure the question is educational, the options are plausible, and the question is unique and interesting.",
    );
    prompt
}
