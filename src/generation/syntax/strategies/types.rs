//! Class, interface and record strategies
//!
//! Member sections (fields, properties, methods) are separated by a blank
//! line; fields and properties are listed one per line, methods are separated
//! by a blank line of their own.

use crate::generation::Result;
use crate::generation::syntax::{
    ClassModel, InterfaceModel, RecordModel, SyntaxGenerationStrategy, SyntaxGenerator, SyntaxModel,
    TypeModel, block,
};

pub struct ClassSyntaxStrategy;

impl SyntaxGenerationStrategy<ClassModel> for ClassSyntaxStrategy {
    fn generate(&self, generator: &SyntaxGenerator, model: &ClassModel) -> Result<String> {
        let mut lines = model
            .attributes
            .iter()
            .map(|attribute| generator.generate(attribute))
            .collect::<Result<Vec<_>>>()?;

        let mut header = vec![model.access.to_string()];
        if model.is_static {
            header.push("static".to_string());
        }
        if model.is_abstract {
            header.push("abstract".to_string());
        }
        header.push("class".to_string());
        header.push(model.name.clone());

        let bases: Vec<&TypeModel> = model.base_class.iter().chain(&model.implements).collect();
        lines.push(declaration(generator, header, &bases)?);

        let body = sections(
            generator,
            [
                (members(&model.fields), "\n"),
                (members(&model.properties), "\n"),
                (members(&model.methods), "\n\n"),
            ],
        )?;
        lines.push(block(&body));
        Ok(lines.join("\n"))
    }
}

pub struct InterfaceSyntaxStrategy;

impl SyntaxGenerationStrategy<InterfaceModel> for InterfaceSyntaxStrategy {
    fn generate(&self, generator: &SyntaxGenerator, model: &InterfaceModel) -> Result<String> {
        let header = vec![
            model.access.to_string(),
            "interface".to_string(),
            model.name.clone(),
        ];
        let bases: Vec<&TypeModel> = model.implements.iter().collect();

        let body = sections(
            generator,
            [
                (members(&model.properties), "\n"),
                (members(&model.methods), "\n"),
            ],
        )?;
        Ok(format!(
            "{}\n{}",
            declaration(generator, header, &bases)?,
            block(&body)
        ))
    }
}

pub struct RecordSyntaxStrategy;

impl SyntaxGenerationStrategy<RecordModel> for RecordSyntaxStrategy {
    fn generate(&self, generator: &SyntaxGenerator, model: &RecordModel) -> Result<String> {
        let mut header = vec![model.access.to_string(), "record".to_string()];
        if model.is_struct {
            header.push("struct".to_string());
        }
        header.push(model.name.clone());
        let bases: Vec<&TypeModel> = model.implements.iter().collect();

        let body = sections(
            generator,
            [
                (members(&model.properties), "\n"),
                (members(&model.methods), "\n\n"),
            ],
        )?;
        Ok(format!(
            "{}\n{}",
            declaration(generator, header, &bases)?,
            block(&body)
        ))
    }
}

fn members<M: SyntaxModel>(items: &[M]) -> Vec<&dyn SyntaxModel> {
    items.iter().map(|item| item as &dyn SyntaxModel).collect()
}

/// `public class Name : Base, IOther`
fn declaration(
    generator: &SyntaxGenerator,
    header: Vec<String>,
    bases: &[&TypeModel],
) -> Result<String> {
    let mut text = header.join(" ");
    if !bases.is_empty() {
        let bases = bases
            .iter()
            .map(|base| generator.generate(*base))
            .collect::<Result<Vec<_>>>()?;
        text.push_str(" : ");
        text.push_str(&bases.join(", "));
    }
    Ok(text)
}

/// Render each non-empty section with its own separator and join the sections
/// with a blank line
fn sections<const N: usize>(
    generator: &SyntaxGenerator,
    sections: [(Vec<&dyn SyntaxModel>, &str); N],
) -> Result<String> {
    let mut rendered = Vec::new();
    for (models, separator) in sections {
        if models.is_empty() {
            continue;
        }
        rendered.push(generator.generate_all(models, separator)?);
    }
    Ok(rendered.join("\n\n"))
}
