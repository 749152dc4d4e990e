use colored::Colorize;

use crate::menu::{Menu, MenuContext, MenuError, MenuOption, Selection};

type OptionsFn = Box<dyn Fn(&MenuContext) -> Vec<MenuOption>>;
type ContentFn = Box<dyn Fn(&MenuContext) -> String>;
type FreeTextFn =
    Box<dyn FnMut(&str, &mut MenuContext) -> Result<Option<Box<dyn Menu>>, MenuError>>;
type PostActionFn = Box<dyn FnMut(&mut MenuContext) -> Result<(), MenuError>>;

/// Footer printed under every option list.
pub const NAVIGATION_HINT: &str =
    "Enter a number to choose, 'b' to go back, 'h' for help, 'q' to quit.";

/// Reusable menu: a title, an option list and optional hooks.
///
/// Rendering order is fixed: title, custom content, options, navigation hint.
///
/// # Example
///
/// ```
/// let menu = MenuSkeleton::new("Reports", |_| {
///     vec![MenuOption::action(1, "System statistics", run_stats)]
/// })
/// .with_content(|ctx| format!("Server: {}", ctx.service().base_url()))
/// .boxed();
/// ```
pub struct MenuSkeleton {
    title: String,
    build_options: OptionsFn,
    content: Option<ContentFn>,
    free_text: Option<FreeTextFn>,
    post_action: Option<PostActionFn>,
    options: Vec<MenuOption>,
    initialized: bool,
    exit_requested: bool,
}

impl MenuSkeleton {
    pub fn new(
        title: impl Into<String>,
        build_options: impl Fn(&MenuContext) -> Vec<MenuOption> + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            build_options: Box::new(build_options),
            content: None,
            free_text: None,
            post_action: None,
            options: Vec::new(),
            initialized: false,
            exit_requested: false,
        }
    }

    /// Free-form text shown between the title and the options.
    pub fn with_content(mut self, content: impl Fn(&MenuContext) -> String + 'static) -> Self {
        self.content = Some(Box::new(content));
        self
    }

    /// Handler for input that is not an option number.
    pub fn with_free_text(
        mut self,
        handler: impl FnMut(&str, &mut MenuContext) -> Result<Option<Box<dyn Menu>>, MenuError>
        + 'static,
    ) -> Self {
        self.free_text = Some(Box::new(handler));
        self
    }

    /// Replaces the default "press Enter" pause after action options.
    pub fn with_post_action(
        mut self,
        hook: impl FnMut(&mut MenuContext) -> Result<(), MenuError> + 'static,
    ) -> Self {
        self.post_action = Some(Box::new(hook));
        self
    }

    pub fn boxed(self) -> Box<dyn Menu> {
        Box::new(self)
    }

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Full screen text for the menu.
    pub fn render(&self, context: &MenuContext) -> String {
        let mut screen = String::new();
        screen.push_str(&format!("{}\n", self.title.bold().cyan()));
        screen.push_str(&format!("{}\n", "=".repeat(self.title.chars().count())));

        if let Some(content) = &self.content {
            let text = content(context);
            if !text.is_empty() {
                screen.push_str(&format!("\n{}\n", text));
            }
        }

        screen.push('\n');
        for option in &self.options {
            let number = format!("{:>2}.", option.number());
            match option.description() {
                Some(description) => screen.push_str(&format!(
                    "  {} {} {}\n",
                    number.bold(),
                    option.name(),
                    format!("- {}", description).dimmed()
                )),
                None => screen.push_str(&format!("  {} {}\n", number.bold(), option.name())),
            }
        }

        screen.push_str(&format!("\n{}\n", NAVIGATION_HINT.dimmed()));
        screen
    }

    fn after_action(&mut self, context: &mut MenuContext) -> Result<(), MenuError> {
        match &mut self.post_action {
            Some(hook) => hook(context),
            None => context.wait_for_enter(),
        }
    }
}

impl Menu for MenuSkeleton {
    fn title(&self) -> &str {
        &self.title
    }

    fn initialize(&mut self, context: &MenuContext) {
        if self.initialized {
            return;
        }
        self.options = (self.build_options)(context);
        self.initialized = true;
    }

    fn display(&self, context: &MenuContext) {
        print!("{}", self.render(context));
    }

    fn handle_input(
        &mut self,
        input: &str,
        context: &mut MenuContext,
    ) -> Result<Option<Box<dyn Menu>>, MenuError> {
        let input = input.trim();

        let Ok(number) = input.parse::<u32>() else {
            return match &mut self.free_text {
                Some(handler) => handler(input, context),
                None => {
                    context.report_error(format!(
                        "Invalid input '{}'. Enter an option number.",
                        input
                    ));
                    context.wait_for_enter()?;
                    Ok(None)
                }
            };
        };

        let Some(option) = self.options.iter_mut().find(|o| o.number() == number) else {
            context.report_error(format!("Invalid option: {}", number));
            context.wait_for_enter()?;
            return Ok(None);
        };

        let is_action = option.is_action();
        let name = option.name().to_string();
        match option.execute(context) {
            Ok(Selection::Open(mut menu)) => {
                menu.initialize(context);
                Ok(Some(menu))
            }
            Ok(Selection::Exit) => {
                self.exit_requested = true;
                Ok(None)
            }
            Ok(Selection::Stay) => {
                if is_action {
                    self.after_action(context)?;
                }
                Ok(None)
            }
            Err(e) => {
                tracing::debug!(option = %name, error = %e, "menu action failed");
                context.report_error(format!("{} failed: {}", name, e));
                self.after_action(context)?;
                Ok(None)
            }
        }
    }

    fn is_exit_requested(&self) -> bool {
        self.exit_requested
    }
}
