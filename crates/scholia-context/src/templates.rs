// Prompt text for summary generation.
// Section headings and field labels come from the shared schema so the model
// is asked for exactly the layout the history parser reads back.

use scholia_types::schema::{field_line, SectionSpec, SECTIONS};
use scholia_types::{CourseContext, SummaryRecord, UNKNOWN};
use std::fmt::Write;

pub const SYSTEM_PROMPT: &str = "You are an expert academic reading assistant with expertise in:
- Identifying central arguments and theoretical frameworks
- Extracting key concepts and definitions with precision
- Recognizing methodological approaches and their limitations
- Synthesizing across texts and disciplines
- Generating thought-provoking Socratic discussion questions
- Identifying empirical evidence (sample sizes, effect sizes, statistical methods)
- Surfacing dialectical tensions and counter-positions

Your summaries help students prepare for seminar discussions by focusing on critical engagement rather than passive comprehension. You prioritize:
1. First-principles analysis of underlying assumptions
2. Explicit connections between readings across weeks
3. Quantitative evidence where available (stats, n-sizes, methodologies)
4. Steelmanned opposing viewpoints
5. Verbatim quotes that capture theoretical precision

You make explicit connections between readings to build cumulative understanding across the semester.";

/// Concepts listed per previous reading
const CONCEPTS_PER_RECORD: usize = 5;

const BRIDGES_HINT: &str = "[Where relevant: Does this reading connect to organizational theory, learning science, philosophy of technology, labor economics, or human-AI collaboration? Note connections only if genuinely present, do not force.]";

const QUESTION_GUIDANCE: &str = "[Generate 3-5 Socratic questions that provoke genuine uncertainty and critical engagement. Select from the following types based on what fits THIS specific reading:]

**Question types to consider (use only those that apply):**
- First-principles: What assumption, if false, would collapse this argument?
- Empirical: What evidence would change the conclusion?
- Application: How would this framework behave under different conditions?
- Dialectical: How might a critic or opposing school respond?
- Synthesis: How does this complicate or extend earlier course readings?
- Methodological: What are the limits of this approach?
- Definitional: Is the author's use of [key term] coherent or contested?

**Requirements:**
- Do NOT force question types that don't fit the reading
- Prioritize questions that would generate genuine disagreement in seminar
- At least one question should be unanswerable from the text alone
- If fewer than 3 question types genuinely apply, generate multiple questions of the same type rather than forcing irrelevant categories";

const CRITICAL_REQUIREMENTS: &str = "CRITICAL REQUIREMENTS:
- Use markdown formatting throughout
- Target total reading time: **10-12 minutes**
- Include page numbers for quotes where detectable in the text
- Be specific and evidence-based, do not fabricate information not in the text
- Maintain academic rigor and precision
- Preserve author's precise terminology, do not paraphrase technical terms
- When statistics are present, report them exactly (do not round or summarize)
- If the reading lacks empirical evidence, note this explicitly
- Quotes must be verbatim, not paraphrased
- Steelman opposing views, do not strawman critics";

/// User prompt for one reading. `reading_text` must already be capped.
pub fn build_summary_prompt(
    reading_text: &str,
    context: &CourseContext,
    previous: &[SummaryRecord],
) -> String {
    let code = context.course_code.as_deref().unwrap_or(UNKNOWN);
    let week_label = context.week_label();
    let paired = if context.other_readings.is_empty() {
        "None detected".to_string()
    } else {
        context.other_readings.join(", ")
    };

    let mut prompt = String::from(
        "You are an academic reading assistant. Generate a structured summary of the following academic text for a college-level course.\n\n",
    );

    prompt.push_str("CONTEXT:\n");
    let _ = writeln!(prompt, "- Course: {} - {}", code, context.course_name.as_deref().unwrap_or(""));
    let _ = write!(prompt, "- Week/Module: {}", week_label);
    if !context.other_readings.is_empty() {
        let _ = write!(prompt, "\n- Paired Readings this week: {}", paired);
    }
    prompt.push_str(&previous_weeks(previous));

    let _ = write!(prompt, "\n\nREADING TEXT:\n{}\n\n", reading_text);

    prompt.push_str("OUTPUT REQUIREMENTS:\n");
    prompt.push_str("Generate a markdown-formatted summary with EXACTLY these five sections. Follow this structure precisely:\n");

    for section in &SECTIONS {
        let _ = write!(prompt, "\n{}\n", section.heading());
        match section.numeral {
            "IV" => prompt.push_str(&synthesis_instructions(!previous.is_empty())),
            "V" => prompt.push_str(QUESTION_GUIDANCE),
            _ => prompt.push_str(&field_lines(section, code, &week_label, &paired)),
        }
        prompt.push('\n');
    }

    prompt.push('\n');
    prompt.push_str(CRITICAL_REQUIREMENTS);
    prompt.push_str(&history_reminder(previous.len()));
    prompt.push('\n');
    prompt
}

fn previous_weeks(previous: &[SummaryRecord]) -> String {
    if previous.is_empty() {
        return String::new();
    }

    let mut section = String::from("\n\nPREVIOUS WEEKS' LEARNING:");
    for record in previous {
        let _ = write!(
            section,
            "\n\nWeek {} - \"{}\" by {}",
            record.week, record.title, record.author
        );
        if !record.thesis.is_empty() {
            let _ = write!(section, "\n- Core Thesis: {}", record.thesis);
        }
        if !record.key_concepts.is_empty() {
            let concepts: Vec<&str> = record
                .key_concepts
                .iter()
                .take(CONCEPTS_PER_RECORD)
                .map(String::as_str)
                .collect();
            let _ = write!(section, "\n- Key Concepts: {}", concepts.join(", "));
        }
    }
    section
}

fn field_lines(section: &SectionSpec, code: &str, week_label: &str, paired: &str) -> String {
    section
        .fields
        .iter()
        .map(|label| {
            let value = match *label {
                "Course" => code.to_string(),
                "Week/Module" => week_label.to_string(),
                "Paired Readings" => format!("[{}]", paired),
                other => field_hint(other).to_string(),
            };
            field_line(label, &value)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn field_hint(label: &str) -> &'static str {
    match label {
        "Theme" => "[Extract or infer the module theme from the reading]",
        "Course Objective" => "[Infer how this reading serves course learning goals]",
        "Discussion Questions" => "[Extract if provided in reading, otherwise note \"Not provided in reading\"]",
        "Central Argument" => "[One clear sentence stating the thesis]",
        "Key Terms" => "[List 5-7 important terms with precise definitions in format \"term: definition\", one per line. Preserve author's exact terminology.]",
        "Framework/Method" => "[Describe the theoretical framework or research methodology used]",
        "Evidence Base" => "[Be specific: n=?, methodology type, effect sizes if reported, limitations acknowledged by author. If purely theoretical, describe the logical structure and types of evidence marshaled. If no empirical evidence, state this explicitly.]",
        "Critical Quotes" => "[Include 3-4 verbatim quotes that capture:
  (a) The core thesis statement
  (b) A key theoretical move or insight
  (c) The most precise definition of a central concept
  (d) Optional: A surprising or counterintuitive claim
  Include page numbers where detectable. Do not paraphrase, use exact wording.]",
        "Internal Contradictions" => "[Identify any contradictions or tensions within the text's argument]",
        "Counter-Positions" => "[Provide the steelmanned opposing view: what would the strongest, most charitable critic say? Name specific theorists, schools, or traditions if identifiable. Do not strawman.]",
        "Assumptions Under Scrutiny" => "[What must be true for this argument to hold? What happens if those assumptions fail?]",
        "Unresolved Questions" => "[What questions does the reading raise but not fully answer?]",
        "Most Contested Claim" => "[Quote the most debatable assertion verbatim, with page number if detectable]",
        _ => "[...]",
    }
}

/// Section IV asks for cross-week connections only when earlier weeks exist
fn synthesis_instructions(has_history: bool) -> String {
    if !has_history {
        return [
            field_line(
                "Connections to Other Readings This Week",
                "[How does this relate to other readings assigned this week?]",
            ),
            field_line(
                "Course Theme Development",
                "[How does this reading introduce or develop key course themes?]",
            ),
            field_line("Transdisciplinary Bridges", BRIDGES_HINT),
        ]
        .join("\n");
    }

    [
        field_line(
            "Connections to This Week's Readings",
            "[How does this relate to other readings assigned this week?]",
        ),
        field_line(
            "Building on Previous Weeks",
            "[IMPORTANT: Make explicit connections to concepts from previous weeks. Reference specific ideas, terms, or frameworks from earlier readings and explain how this reading builds upon, challenges, or extends them. Use specific week references.]",
        ),
        field_line(
            "Course Theme Progression",
            "[How does this advance or challenge themes developed in earlier weeks?]",
        ),
        field_line("Transdisciplinary Bridges", BRIDGES_HINT),
        String::new(),
        "*Note: This section should explicitly reference concepts from previous weeks to demonstrate cumulative learning.*".to_string(),
    ]
    .join("\n")
}

fn history_reminder(count: usize) -> String {
    if count == 0 {
        return String::new();
    }
    format!(
        "\n\n**IMPORTANT**: You have been provided with context from {} previous week(s) of readings. In Section IV (Cross-Reading Synthesis), you MUST make explicit connections to concepts, frameworks, and ideas from those earlier readings. Reference specific weeks and show how this reading relates to the cumulative learning trajectory of the course.",
        count
    )
}
