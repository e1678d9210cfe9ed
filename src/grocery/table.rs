//! Tabular rendering with a fixed column order per operation.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::grocery::model::{IngredientEntry, RecipeSummary, ShoppingList};

pub const RECIPE_COLUMNS: [&str; 4] = ["Recipe", "Servings", "Price Per Serving", "Recipe ID"];
pub const INGREDIENT_COLUMNS: [&str; 3] = ["Ingredient", "Amount", "Unit"];
pub const SHOPPING_LIST_COLUMNS: [&str; 5] = ["Item", "Amount", "Unit", "Cost (USD)", "Item ID"];

pub const SHOPPING_LIST_TITLE: &str = "Shopping list";
pub const TOTAL_COST_LABEL: &str = "Total cost";

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(u64),
    Decimal(f64),
    /// Dollars, always printed with two decimals.
    Money(f64),
    Blank,
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Blank)
    }

    fn is_numeric(&self) -> bool {
        matches!(self, Cell::Integer(_) | Cell::Decimal(_) | Cell::Money(_))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) => f.write_str(text),
            Cell::Integer(value) => write!(f, "{}", value),
            // Debug keeps a trailing ".0" on whole amounts
            Cell::Decimal(value) => write!(f, "{:?}", value),
            Cell::Money(value) => write!(f, "{:.2}", value),
            Cell::Blank => Ok(()),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Text(text) => serializer.serialize_str(text),
            Cell::Integer(value) => serializer.serialize_u64(*value),
            Cell::Decimal(value) | Cell::Money(value) => serializer.serialize_f64(*value),
            Cell::Blank => serializer.serialize_str(""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    columns: Vec<&'static str>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: &[&'static str]) -> Self {
        Self {
            title: None,
            columns: columns.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len(), "row width must match columns");
        self.rows.push(row);
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up a cell by row index and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.columns.iter().position(|c| *c == column)?;
        self.rows.get(row).and_then(|r| r.get(index))
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(title) = &self.title {
            writeln!(f, "{}", title)?;
        }

        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                rendered
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(column.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| format!("{:<width$}", column, width = *width))
            .collect();
        writeln!(f, "{}", header.join("  ").trim_end())?;

        for (row, cells) in self.rows.iter().zip(&rendered) {
            let line: Vec<String> = row
                .iter()
                .zip(cells)
                .zip(&widths)
                .map(|((cell, text), width)| {
                    if cell.is_numeric() {
                        format!("{:>width$}", text, width = *width)
                    } else {
                        format!("{:<width$}", text, width = *width)
                    }
                })
                .collect();
            writeln!(f, "{}", line.join("  ").trim_end())?;
        }

        Ok(())
    }
}

/// Values that render as one of the fixed operation tables.
pub trait Tabular {
    fn to_table(&self) -> Table;
}

impl Tabular for [RecipeSummary] {
    fn to_table(&self) -> Table {
        let mut table = Table::new(&RECIPE_COLUMNS);
        for recipe in self {
            table.push_row(vec![
                Cell::Text(recipe.title.clone()),
                Cell::Integer(u64::from(recipe.servings)),
                Cell::Money(recipe.price_per_serving),
                Cell::Integer(recipe.recipe_id),
            ]);
        }
        table
    }
}

impl Tabular for [IngredientEntry] {
    fn to_table(&self) -> Table {
        let mut table = Table::new(&INGREDIENT_COLUMNS);
        for ingredient in self {
            table.push_row(vec![
                Cell::Text(ingredient.name.clone()),
                Cell::Decimal(ingredient.amount),
                Cell::Text(ingredient.unit.clone()),
            ]);
        }
        table
    }
}

/// One row per item plus a trailing "Total cost" row with no item identity.
impl Tabular for ShoppingList {
    fn to_table(&self) -> Table {
        let mut table = Table::new(&SHOPPING_LIST_COLUMNS).with_title(SHOPPING_LIST_TITLE);
        for item in &self.items {
            table.push_row(vec![
                Cell::Text(item.name.clone()),
                Cell::Decimal(item.amount),
                Cell::Text(item.unit.clone()),
                Cell::Money(item.cost),
                Cell::Integer(item.item_id),
            ]);
        }
        table.push_row(vec![
            Cell::Text(TOTAL_COST_LABEL.to_string()),
            Cell::Blank,
            Cell::Blank,
            Cell::Money(self.total_cost),
            Cell::Blank,
        ]);
        table
    }
}
