// The `reply` module drafts offline reply templates without calling the model.

const LINKEDIN_REPLY: &str = "Hi there,

Thank you for the LinkedIn invitation! I'd be happy to connect with you.

Looking forward to staying in touch and potentially collaborating in the future.

Best regards,
[Your Name]";

const JOB_REPLY: &str = "Hello,

Thank you for reaching out about this opportunity. I'm very interested in learning more about the position.

Could you please provide additional details about:
- Job responsibilities and requirements
- Team structure and company culture
- Next steps in the application process

I'd appreciate the chance to discuss how my skills and experience align with your needs.

Best regards,
[Your Name]";

const COURSE_REPLY: &str = "Hello,

Thank you for sharing this learning opportunity. I'm interested in expanding my skills in this area.

Could you provide more information about:
- Course curriculum and duration
- Prerequisites or requirements
- Enrollment process

Looking forward to your response.

Best regards,
[Your Name]";

const GENERIC_REPLY: &str = "Hello,

Thank you for your email. I appreciate you reaching out.

I'd like to learn more about this. Could you please provide additional details?

Looking forward to hearing from you.

Best regards,
[Your Name]";

const JOB_WORDS: &[&str] = &["job", "position", "career", "hiring", "opportunity"];
const COURSE_WORDS: &[&str] = &["course", "learning", "education", "training"];

/// Picks a reply template for the given email content.
///
/// Checked in order: LinkedIn invitation, job, course, then a generic reply.
/// Matching is case-insensitive.
pub fn draft_reply(content: &str) -> &'static str {
    let content = content.to_lowercase();
    let has_any = |words: &[&str]| words.iter().any(|w| content.contains(w));

    if content.contains("linkedin") && content.contains("invitation") {
        LINKEDIN_REPLY
    } else if has_any(JOB_WORDS) {
        JOB_REPLY
    } else if has_any(COURSE_WORDS) {
        COURSE_REPLY
    } else {
        GENERIC_REPLY
    }
}
