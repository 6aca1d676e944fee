use tera::{Context, Tera};
use tracing::debug;

use ptplan_core::models::patient::PatientRecord;

use crate::error::ExportError;
use crate::plan::PlanView;

/// Built-in plain-text treatment plan.
pub const TREATMENT_PLAN_TEMPLATE: &str = "\
PHYSICAL THERAPY TREATMENT PLAN
==============================

PATIENT INFORMATION
--------------------
Name: {{ name }}
Age: {{ age }}
Injury Location: {{ injury_location }}
Pain Level: {{ pain_level }}/10
Mobility Status: {{ mobility_status }}
Activity Level: {{ activity_level }}

Treatment Goals:
{{ goals }}

WEEKLY EXERCISE SCHEDULE
--------------------
{% for day in days %}
{{ day.day }}:
{% if day.exercises %}{% for exercise in day.exercises %}  \u{2022} {{ exercise.name }}
    Parameters: {{ exercise.parameters }}
    Description: {{ exercise.description }}
    Progression Criteria: {{ exercise.progressionCriteria }}
{% endfor %}{% else %}Rest day / No exercises scheduled
{% endif %}{% endfor %}{% if notes %}
NOTES
--------------------
{{ notes }}
{% endif %}
Generated: {{ generated_at }}
";

/// Render the built-in treatment plan for one patient.
pub fn render_treatment_plan(
    record: &PatientRecord,
    generated_at: jiff::Timestamp,
) -> Result<String, ExportError> {
    let view = PlanView::from_record(record, generated_at);
    render_template("treatment_plan", TREATMENT_PLAN_TEMPLATE, &view)
}

/// Render a Tera template against a plan view.
///
/// The `template_content` is the raw template string (Jinja2 syntax). Output
/// is plain text, so autoescaping is off regardless of the template name.
pub fn render_template(
    template_name: &str,
    template_content: &str,
    view: &PlanView,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(view)?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    debug!(template_name, bytes = rendered.len(), "plan rendered");
    Ok(rendered)
}
