//! Workbook → model conversion

use tabula_core::{Cell, FormulaResult, Hyperlink, Value, Workbook, Worksheet};

use crate::model::{
    date_to_millis, CellModel, DefinedNameModel, FormulaModel, HyperlinkModel, PropertiesModel,
    ResultModel, ValueModel, WorkbookModel, WorksheetModel,
};

/// Builds a [`WorkbookModel`] from a workbook
pub struct ModelWriter;

impl ModelWriter {
    /// Convert a workbook to its serializable model
    ///
    /// The whole string table is written, in handle order, including strings
    /// no cell refers to anymore, so handles keep their numbers.
    pub fn write(workbook: &Workbook) -> WorkbookModel {
        let shared_strings: Vec<String> = workbook
            .strings()
            .iter()
            .map(|(_, s)| s.to_string())
            .collect();

        let worksheets: Vec<WorksheetModel> =
            workbook.worksheets().map(Self::write_worksheet).collect();

        let defined_names = workbook
            .defined_names()
            .iter()
            .map(|n| DefinedNameModel {
                name: n.name.clone(),
                sheet: n.sheet.clone(),
                address: n.address.to_a1_string(),
            })
            .collect();

        let props = workbook.properties();
        let properties = PropertiesModel {
            creator: props.creator.clone(),
            last_modified_by: props.last_modified_by.clone(),
            created: props.created().map(date_to_millis),
            modified: props.modified().map(date_to_millis),
        };

        log::debug!(
            "wrote workbook model: {} sheet(s), {} cell(s), {} shared string(s)",
            worksheets.len(),
            worksheets.iter().map(|ws| ws.cells.len()).sum::<usize>(),
            shared_strings.len()
        );

        WorkbookModel {
            properties,
            worksheets,
            shared_strings,
            defined_names,
        }
    }

    fn write_worksheet(sheet: &Worksheet) -> WorksheetModel {
        WorksheetModel {
            name: sheet.name().to_string(),
            cells: sheet.cells().map(Self::write_cell).collect(),
        }
    }

    fn write_cell(cell: &Cell) -> CellModel {
        CellModel {
            address: cell.address().to_a1_string(),
            value: Self::write_value(cell.value()),
            style_index: cell.style_index(),
        }
    }

    fn write_value(value: &Value) -> ValueModel {
        match value {
            Value::Null => ValueModel::Null,
            Value::Number(n) => ValueModel::Number(*n),
            Value::String(handle) => ValueModel::String(handle.index()),
            Value::Date(d) => ValueModel::Date(date_to_millis(*d)),
            Value::Hyperlink(link) => ValueModel::Hyperlink(write_hyperlink(link)),
            Value::Formula { formula, result } => ValueModel::Formula(FormulaModel {
                formula: formula.clone(),
                result: Self::write_result(result),
            }),
        }
    }

    fn write_result(result: &FormulaResult) -> ResultModel {
        match result {
            FormulaResult::Null => ResultModel::Null,
            FormulaResult::Number(n) => ResultModel::Number(*n),
            FormulaResult::String(s) => ResultModel::String(s.clone()),
            FormulaResult::Date(d) => ResultModel::Date(date_to_millis(*d)),
            FormulaResult::Hyperlink(link) => ResultModel::Hyperlink(write_hyperlink(link)),
        }
    }
}

fn write_hyperlink(link: &Hyperlink) -> HyperlinkModel {
    HyperlinkModel {
        text: link.text.clone(),
        target: link.target.clone(),
    }
}
