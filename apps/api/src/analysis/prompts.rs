// LLM prompt template for the visa analysis module.
// The template is the only interface definition the model sees: key names,
// value domains and formatting rules here must match `analysis::schema`.

/// Visa eligibility prompt template.
/// Replace: {education}, {experience}, {field}, {current_status}, {has_offer},
///          {job_details}, {achievements}, {country}
pub const VISA_ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an expert US immigration attorney. Analyze this candidate's profile and provide visa eligibility assessment.

Candidate Profile:
- Education: {education}
- Work Experience: {experience} years in {field}
- Current Status: {current_status}
- Has Job Offer: {has_offer}
- Job Details: {job_details}
- Special Achievements: {achievements}
- Country of Origin: {country}

Analyze eligibility for these visa categories:
1. H-1B (Specialty Occupation)
2. O-1A (Extraordinary Ability - Sciences/Business/Education)
3. O-1B (Extraordinary Ability - Arts/Entertainment)
4. EB-2 (Advanced Degree or Exceptional Ability)
5. EB-3 (Skilled Worker)
6. L-1 (Intracompany Transfer, if applicable)

For EACH visa type, provide:
- eligible: "yes" | "maybe" | "no"
- confidence: integer from 1 to 10
- reasoning: detailed explanation (2-3 sentences)
- requirements_met: list of requirements they satisfy
- requirements_missing: list of requirements they don't meet
- next_steps: concrete actions they should take
- timeline: estimated processing time
- estimated_cost: filing fees + attorney fees range

Also provide:
- recommended_path: which visa to pursue first
- overall_assessment: 2-3 sentence summary
- risk_factors: potential issues to address

Use exactly these keys under "visas": "H1B", "O1A", "O1B", "EB2", "EB3", "L1".

Respond with ONLY valid JSON. No markdown, no backticks, no additional text.

JSON structure:
{
  "visas": {
    "H1B": {
      "eligible": "yes|maybe|no",
      "confidence": 8,
      "reasoning": "...",
      "requirements_met": [],
      "requirements_missing": [],
      "next_steps": [],
      "timeline": "...",
      "estimated_cost": "..."
    },
    // ... same shape for "O1A", "O1B", "EB2", "EB3", "L1"
  },
  "recommended_path": "...",
  "overall_assessment": "...",
  "risk_factors": []
}"#;
