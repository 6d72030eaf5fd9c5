//! Command handlers and shared rendering helpers

pub mod fields;
pub mod forms;
pub mod submissions;
pub mod templates;

use colored::*;

use crate::schema::{CustomFieldTemplate, Form, FormField};

pub(crate) fn print_form(form: &Form) {
    let status = if form.is_published {
        "published".green()
    } else {
        "draft".yellow()
    };
    println!(
        "{} {} [{}]",
        form.name.bold(),
        format!("({})", form.id).dimmed(),
        status
    );
    if let Some(description) = &form.description {
        println!("  {}", description.dimmed());
    }
    print_fields(&form.fields);
}

pub(crate) fn print_template(template: &CustomFieldTemplate) {
    println!(
        "{} {}",
        template.name.bold(),
        format!("({})", template.id).dimmed()
    );
    if let Some(description) = &template.description {
        println!("  {}", description.dimmed());
    }
    print_fields(&template.fields);
}

fn print_fields(fields: &[FormField]) {
    if fields.is_empty() {
        println!("  {}", "no fields".dimmed());
        return;
    }
    for (index, field) in fields.iter().enumerate() {
        let required = if field.required { " *".red().to_string() } else { String::new() };
        let mut extras = Vec::new();
        if let Some(options) = &field.options {
            extras.push(format!("{} options", options.len()));
        }
        if let Some(groups) = &field.sub_field_options {
            extras.push(format!(
                "groups: {} units, {} types, {} stages, {} uses",
                groups.units.len(),
                groups.types.len(),
                groups.stages.len(),
                groups.uses.len()
            ));
        }
        if let Some(validations) = &field.validations
            && !validations.is_empty()
        {
            extras.push("constrained".to_string());
        }
        let extras = if extras.is_empty() {
            String::new()
        } else {
            format!(" - {}", extras.join(", ")).dimmed().to_string()
        };
        println!(
            "  {}. {}{} {} {}{}",
            index + 1,
            field.label,
            required,
            field.field_type.tag().cyan(),
            format!("({})", field.id).dimmed(),
            extras
        );
    }
}
