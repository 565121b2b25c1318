use std::collections::HashSet;
use std::fmt;

use crate::domain::{
    select_granularity, Property, ScreenParameters, PROJECTED_PROPERTIES, RECORD_CREATED_BY,
};
use crate::error::{AuditError, AuditResult};
use crate::grouping::TimeGroups;
use crate::host::{DataTable, Localizer, ScreenParametersFn};

/// Resolved column set shown for each audit row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    properties: Vec<Property>,
}

impl Projection {
    /// Resolve the fixed audit columns against the table schema. Every column
    /// must exist.
    pub fn resolve<T: DataTable>(table: &T) -> AuditResult<Self> {
        let properties = PROJECTED_PROPERTIES
            .iter()
            .map(|id| {
                table
                    .property_by_id(id)
                    .cloned()
                    .ok_or_else(|| AuditError::UnknownProperty(id.to_string()))
            })
            .collect::<AuditResult<Vec<_>>>()?;
        Ok(Self { properties })
    }

    pub fn column_names(&self) -> Vec<String> {
        self.properties.iter().map(|p| p.name.clone()).collect()
    }

    fn cells<T: DataTable>(&self, table: &T, row: &T::Row) -> Vec<String> {
        self.properties
            .iter()
            .map(|p| table.cell_text(row, &p.id))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub id: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSection {
    pub key: u32,
    pub header: String,
    pub columns: Vec<String>,
    pub rows: Vec<RenderedRow>,
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditRender {
    Empty {
        message: String,
    },
    Grouped {
        summary: String,
        sections: Vec<GroupSection>,
    },
}

impl AuditRender {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    /// Number of text lines the plain rendering occupies.
    pub fn line_count(&self) -> usize {
        match self {
            Self::Empty { .. } => 1,
            Self::Grouped { sections, .. } => {
                1 + sections.iter().map(|s| 3 + s.rows.len()).sum::<usize>()
            }
        }
    }
}

impl fmt::Display for AuditRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { message } => writeln!(f, "{}", message),
            Self::Grouped { summary, sections } => {
                writeln!(f, "{}", summary)?;
                for section in sections {
                    writeln!(f)?;
                    writeln!(f, "{}", section.header)?;
                    writeln!(f, "{}", section.columns.join("\t"))?;
                    for row in &section.rows {
                        writeln!(f, "{}", row.cells.join("\t"))?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Distinct creator identities across all rows.
pub fn distinct_users<T: DataTable>(table: &T) -> usize {
    table
        .rows()
        .iter()
        .map(|row| table.cell_text(row, RECORD_CREATED_BY))
        .collect::<HashSet<_>>()
        .len()
}

/// Read-only grouped view over a host data table.
pub struct AuditView<L> {
    projection: Projection,
    localizer: L,
    screen_parameters: ScreenParametersFn,
}

impl<L: Localizer> AuditView<L> {
    /// Fails when the table lacks one of the projected columns.
    pub fn new<T: DataTable>(
        table: &T,
        localizer: L,
        screen_parameters: ScreenParametersFn,
    ) -> AuditResult<Self> {
        Ok(Self {
            projection: Projection::resolve(table)?,
            localizer,
            screen_parameters,
        })
    }

    pub fn render<T: DataTable>(&self, table: &T) -> AuditResult<AuditRender> {
        let parameters: Option<ScreenParameters> = (self.screen_parameters)();
        let granularity = select_granularity(parameters.as_ref());

        let granularity = match granularity {
            Some(g) if !table.rows().is_empty() => g,
            _ => {
                tracing::debug!(
                    "Rendering empty state: {} rows, granularity {:?}",
                    table.rows().len(),
                    granularity
                );
                return Ok(AuditRender::Empty {
                    message: self.localizer.translate("empty", &[]),
                });
            }
        };

        let groups = TimeGroups::build(table, granularity)?;
        let columns = self.projection.column_names();
        let sections = groups
            .keys()
            .map(|key| -> AuditResult<GroupSection> {
                let rows = groups
                    .rows(key)
                    .ok_or(AuditError::UnknownBucket(key))?
                    .into_iter()
                    .map(|row| RenderedRow {
                        id: table.row_id(row),
                        cells: self.projection.cells(table, row),
                    })
                    .collect();
                Ok(GroupSection {
                    key,
                    header: groups.header_text(key)?,
                    columns: columns.clone(),
                    rows,
                })
            })
            .collect::<AuditResult<Vec<_>>>()?;

        Ok(AuditRender::Grouped {
            summary: self.summary(table),
            sections,
        })
    }

    fn summary<T: DataTable>(&self, table: &T) -> String {
        self.localizer.translate(
            "recordSummary",
            &[
                ("recordCount", table.rows().len().to_string()),
                ("userCount", distinct_users(table).to_string()),
            ],
        )
    }
}
