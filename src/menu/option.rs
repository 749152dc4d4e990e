use crate::menu::{Menu, MenuContext, MenuError};

/// Builds a submenu when its option is selected.
pub type MenuSupplier = Box<dyn Fn() -> Box<dyn Menu>>;

/// Procedure run by an action option.
pub type MenuAction = Box<dyn FnMut(&mut MenuContext) -> Result<(), MenuError>>;

/// Payload of a menu option. Exactly one variant per option; `Exit` has none.
pub enum OptionKind {
    Submenu(MenuSupplier),
    Action(MenuAction),
    Exit,
}

/// What executing an option asks the owning menu to do next.
pub enum Selection {
    Stay,
    Open(Box<dyn Menu>),
    Exit,
}

/// One numbered entry of a menu. Numbers are unique within their menu only.
pub struct MenuOption {
    number: u32,
    name: String,
    description: Option<String>,
    kind: OptionKind,
}

impl MenuOption {
    /// Option that opens another menu.
    ///
    /// # Arguments
    ///
    /// * `number` - Number the user types to select the option
    /// * `name` - Label shown in the option list
    /// * `supplier` - Builds the submenu each time the option is selected
    ///
    /// # Example
    ///
    /// ```
    /// MenuOption::submenu(1, "Tickets", screens::tickets_menu).describe("browse tickets");
    /// ```
    pub fn submenu(
        number: u32,
        name: impl Into<String>,
        supplier: impl Fn() -> Box<dyn Menu> + 'static,
    ) -> Self {
        Self::with_kind(number, name, OptionKind::Submenu(Box::new(supplier)))
    }

    /// Option that runs `action` and keeps the current menu.
    ///
    /// # Example
    ///
    /// ```
    /// MenuOption::action(2, "Search clients", |ctx| {
    ///     let clients = ctx.service().search_clients("acme")?;
    ///     println!("{} matches", clients.len());
    ///     Ok(())
    /// });
    /// ```
    pub fn action(
        number: u32,
        name: impl Into<String>,
        action: impl FnMut(&mut MenuContext) -> Result<(), MenuError> + 'static,
    ) -> Self {
        Self::with_kind(number, name, OptionKind::Action(Box::new(action)))
    }

    /// Option that ends the session.
    pub fn exit(number: u32, name: impl Into<String>) -> Self {
        Self::with_kind(number, name, OptionKind::Exit)
    }

    fn with_kind(number: u32, name: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            number,
            name: name.into(),
            description: None,
            kind,
        }
    }

    /// Adds a short description shown next to the name.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_action(&self) -> bool {
        matches!(self.kind, OptionKind::Action(_))
    }

    /// Runs the payload.
    ///
    /// Submenus are returned uninitialized; the caller initializes them.
    pub fn execute(&mut self, context: &mut MenuContext) -> Result<Selection, MenuError> {
        match &mut self.kind {
            OptionKind::Exit => Ok(Selection::Exit),
            OptionKind::Submenu(supplier) => Ok(Selection::Open(supplier())),
            OptionKind::Action(action) => {
                action(context)?;
                Ok(Selection::Stay)
            }
        }
    }
}

impl std::fmt::Debug for MenuOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            OptionKind::Submenu(_) => "submenu",
            OptionKind::Action(_) => "action",
            OptionKind::Exit => "exit",
        };
        f.debug_struct("MenuOption")
            .field("number", &self.number)
            .field("name", &self.name)
            .field("kind", &kind)
            .finish()
    }
}
