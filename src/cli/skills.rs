use clap::Parser;

use crate::{
    api::ApiService,
    cli::{self, CommandContext, OutputFormat, ReportCommand},
    info,
    types::{SkillCoverage, SkillCoverageTableRow},
    warning,
};

#[derive(Parser, Debug, Clone)]
pub struct SkillsOptions {
    /// Only skills without enough technicians
    #[clap(long)]
    pub understaffed: bool,
}

/// Skill coverage: technicians per skill against open tickets needing it.
pub struct SkillsCommand {
    context: CommandContext,
    options: SkillsOptions,
}

impl ReportCommand for SkillsCommand {
    const NAME: &'static str = "skills";
    type Options = SkillsOptions;

    fn from_parts(context: CommandContext, options: SkillsOptions) -> Self {
        Self { context, options }
    }

    fn context(&self) -> &CommandContext {
        &self.context
    }

    fn run(&mut self, service: &ApiService) -> i32 {
        let mut coverage = match cli::fetch(&self.context, "Fetching skill coverage...", || {
            service.skill_coverage()
        }) {
            Ok(coverage) => coverage,
            Err(e) => return cli::api_failure(Self::NAME, &e),
        };

        if self.options.understaffed {
            coverage.retain(|c| c.is_understaffed());
        }

        if coverage.is_empty() {
            info!("No skills to report.");
            return cli::EXIT_OK;
        }

        coverage.sort_by(|a, b| {
            b.is_understaffed()
                .cmp(&a.is_understaffed())
                .then(a.skill.cmp(&b.skill))
        });

        let understaffed = coverage.iter().filter(|c| c.is_understaffed()).count();
        let rows: Vec<SkillCoverageTableRow> = coverage.iter().map(coverage_row).collect();
        let code = cli::emit(&self.context, &coverage, rows);

        if code == cli::EXIT_OK && self.context.format == OutputFormat::Table && understaffed > 0 {
            warning!("{} skills are understaffed.", understaffed);
        }
        code
    }
}

fn coverage_row(coverage: &SkillCoverage) -> SkillCoverageTableRow {
    SkillCoverageTableRow {
        skill: coverage.skill.clone(),
        technicians: coverage.technician_count,
        open_tickets: coverage.open_ticket_count,
        coverage: if coverage.is_understaffed() {
            "understaffed".to_string()
        } else {
            "ok".to_string()
        },
    }
}
