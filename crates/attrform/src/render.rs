//! Terminal rendering for the form model and search results.

use console::style;

use attrformapp::classify::WidgetKind;
use attrformapp::message::{Notice, NoticeLevel};
use attrformapp::model::{Field, FormModel};
use attrformapp::search::{MatchSegment, SearchOutcome};

pub fn print_model(component_name: &str, model: &FormModel) {
    println!("{}", style(component_name).bold());
    if model.sections.is_empty() {
        println!("  {}", style("no options available").dim());
        return;
    }
    for section in &model.sections {
        let marker = if section.expanded { "-" } else { "+" };
        println!("{} {}", marker, style(&section.name).cyan().bold());
        for field in &section.fields {
            println!("    {}", field_line(field, &field.label));
        }
    }
}

pub fn print_search(model: &FormModel, outcome: &SearchOutcome, query: &str) {
    let mut any = false;
    for section_match in outcome.sections.iter().filter(|s| s.visible) {
        println!("- {}", style(&section_match.name).cyan().bold());
        for field_match in section_match.fields.iter().filter(|f| f.visible) {
            if let Some(field) = model.field(&section_match.name, &field_match.key) {
                println!("    {}", field_line(field, &highlighted(&field_match.label)));
                any = true;
            }
        }
    }
    if !any {
        println!("{}", style(format!("no fields match {query:?}")).dim());
    }
}

pub fn print_notices(notices: &[Notice]) {
    for notice in notices {
        let prefix = match notice.level {
            NoticeLevel::Info => style("info:").dim(),
            NoticeLevel::Success => style("ok:").green(),
            NoticeLevel::Warning => style("warning:").yellow().bold(),
            NoticeLevel::Error => style("error:").red().bold(),
        };
        eprintln!("{prefix} {}", notice.content);
    }
}

fn field_line(field: &Field, label: &str) -> String {
    let mut line = format!(
        "{} ({}): {}",
        label,
        widget_summary(&field.widget),
        field.current.display_string()
    );
    if let Some(unit) = &field.unit {
        line.push(' ');
        line.push_str(unit);
    }
    line
}

fn widget_summary(widget: &WidgetKind) -> String {
    match widget {
        WidgetKind::Checkbox => "checkbox".to_string(),
        WidgetKind::Select(options) => {
            let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
            format!("select: {}", labels.join("|"))
        }
        WidgetKind::Number { integer: true } => "number".to_string(),
        WidgetKind::Number { integer: false } => "decimal".to_string(),
        WidgetKind::Text => "text".to_string(),
    }
}

fn highlighted(segments: &[MatchSegment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            MatchSegment::Plain(text) => text.clone(),
            MatchSegment::Match(text) => style(text).yellow().bold().to_string(),
        })
        .collect()
}
