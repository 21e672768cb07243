//! Model → workbook conversion

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use tabula_core::{
    CellAddress, Error as CoreError, FormulaResult, Hyperlink, SharedStrings, StringHandle,
    Value, Workbook,
};

use crate::error::{ModelError, ModelResult};
use crate::model::{
    millis_to_date, CellModel, DefinedNameModel, HyperlinkModel, ResultModel, ValueModel,
    WorkbookModel, WorksheetModel,
};

/// Rebuilds a [`Workbook`] from a [`WorkbookModel`]
pub struct ModelReader;

impl ModelReader {
    /// Convert a model back into a workbook
    ///
    /// The string table is restored first so every handle keeps its number,
    /// then worksheets and cells in order, then defined names. The workbook is
    /// built from scratch; on error nothing is returned.
    pub fn read(model: &WorkbookModel) -> ModelResult<Workbook> {
        let strings = SharedStrings::from_table(&model.shared_strings).map_err(|dup| {
            ModelError::malformed(format!(
                "shared string {} repeats {} ({:?})",
                dup.duplicate,
                dup.first,
                model
                    .shared_strings
                    .get(dup.duplicate.index() as usize)
                    .map(String::as_str)
                    .unwrap_or_default()
            ))
        })?;

        let mut workbook = Workbook::with_strings(strings);

        for sheet in &model.worksheets {
            Self::read_worksheet(&mut workbook, sheet)?;
        }

        let mut seen = BTreeSet::new();
        for name in &model.defined_names {
            if !seen.insert(name.name.to_lowercase()) {
                return Err(ModelError::malformed(format!(
                    "defined name '{}' appears more than once",
                    name.name
                )));
            }
            Self::read_defined_name(&mut workbook, name)?;
        }

        let props = workbook.properties_mut();
        props.creator = model.properties.creator.clone();
        props.last_modified_by = model.properties.last_modified_by.clone();
        props.set_created(
            model
                .properties
                .created
                .map(|ms| read_date(ms, "property 'created'"))
                .transpose()?,
        );
        props.set_modified(
            model
                .properties
                .modified
                .map(|ms| read_date(ms, "property 'modified'"))
                .transpose()?,
        );

        log::debug!(
            "read workbook model: {} sheet(s), {} shared string(s), {} defined name(s)",
            workbook.sheet_count(),
            workbook.strings().len(),
            workbook.defined_names().len()
        );

        Ok(workbook)
    }

    fn read_worksheet(workbook: &mut Workbook, model: &WorksheetModel) -> ModelResult<()> {
        let mut sheet = workbook.add_worksheet(&model.name).map_err(|e| match e {
            CoreError::DuplicateWorksheetName(name) => {
                ModelError::malformed(format!("worksheet '{}' appears more than once", name))
            }
            other => ModelError::malformed(format!("worksheet '{}': {}", model.name, other)),
        })?;

        for cell in &model.cells {
            let address = CellAddress::parse(&cell.address).map_err(|_| {
                ModelError::malformed(format!(
                    "worksheet '{}': invalid cell address '{}'",
                    model.name, cell.address
                ))
            })?;
            if sheet.worksheet().cell_at(address).is_some() {
                return Err(ModelError::malformed(format!(
                    "worksheet '{}': cell {} appears more than once",
                    model.name, address
                )));
            }

            let value = read_value(&model.name, cell)?;
            let mut target = sheet.cell_at(address);
            target.set_typed_value(value).map_err(|e| match e {
                CoreError::InvalidStringHandle(index) => ModelError::malformed(format!(
                    "{}!{}: string handle #{} is not in the shared string table",
                    model.name, address, index
                )),
                other => ModelError::malformed(format!("{}!{}: {}", model.name, address, other)),
            })?;
            target.set_style_index(cell.style_index);
        }

        Ok(())
    }

    fn read_defined_name(workbook: &mut Workbook, model: &DefinedNameModel) -> ModelResult<()> {
        let address = CellAddress::parse(&model.address).map_err(|_| {
            ModelError::malformed(format!(
                "defined name '{}': invalid address '{}'",
                model.name, model.address
            ))
        })?;

        let existing = workbook
            .worksheet(&model.sheet)
            .ok_or_else(|| {
                ModelError::malformed(format!(
                    "defined name '{}' refers to missing worksheet '{}'",
                    model.name, model.sheet
                ))
            })?
            .cell_at(address)
            .ok_or_else(|| {
                ModelError::malformed(format!(
                    "defined name '{}' refers to missing cell {}!{}",
                    model.name, model.sheet, address
                ))
            })?;
        if let Some(alias) = existing.alias() {
            return Err(ModelError::malformed(format!(
                "defined name '{}': cell {}!{} is already named '{}'",
                model.name, model.sheet, address, alias
            )));
        }

        let mut sheet = workbook.worksheet_mut(&model.sheet).ok_or_else(|| {
            ModelError::malformed(format!(
                "defined name '{}' refers to missing worksheet '{}'",
                model.name, model.sheet
            ))
        })?;
        sheet
            .cell_at(address)
            .set_alias(&model.name)
            .map_err(|e| ModelError::malformed(format!("defined name '{}': {}", model.name, e)))
    }
}

fn read_value(sheet: &str, cell: &CellModel) -> ModelResult<Value> {
    let context = || format!("{}!{}", sheet, cell.address);
    Ok(match &cell.value {
        ValueModel::Null => Value::Null,
        ValueModel::Number(n) => Value::Number(*n),
        ValueModel::String(index) => Value::String(StringHandle::from_index(*index)),
        ValueModel::Date(ms) => Value::Date(read_date(*ms, &context())?),
        ValueModel::Hyperlink(link) => Value::Hyperlink(read_hyperlink(link)),
        ValueModel::Formula(formula) => Value::Formula {
            formula: formula.formula.clone(),
            result: match &formula.result {
                ResultModel::Null => FormulaResult::Null,
                ResultModel::Number(n) => FormulaResult::Number(*n),
                ResultModel::String(s) => FormulaResult::String(s.clone()),
                ResultModel::Date(ms) => FormulaResult::Date(read_date(*ms, &context())?),
                ResultModel::Hyperlink(link) => FormulaResult::Hyperlink(read_hyperlink(link)),
            },
        },
    })
}

fn read_hyperlink(link: &HyperlinkModel) -> Hyperlink {
    Hyperlink::new(link.text.clone(), link.target.clone())
}

fn read_date(millis: i64, context: &str) -> ModelResult<NaiveDateTime> {
    millis_to_date(millis).ok_or_else(|| {
        ModelError::malformed(format!("{}: date {} ms is out of range", context, millis))
    })
}
