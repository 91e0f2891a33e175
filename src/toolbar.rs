//! Toolbar state: exclusive toggle buttons and the collapsible action menu.

use std::collections::HashMap;
use std::hash::Hash;

use crate::config::ChartConfig;

/// Map from exclusivity group to its currently active member.
///
/// Activating a member implicitly deactivates whichever member of the same
/// group was active before; other groups are untouched.
#[derive(Debug, Clone)]
pub struct ToggleGroups<G, M> {
    active: HashMap<G, M>,
}

impl<G, M> Default for ToggleGroups<G, M> {
    fn default() -> Self {
        Self {
            active: HashMap::new(),
        }
    }
}

impl<G, M> ToggleGroups<G, M>
where
    G: Eq + Hash + Copy,
    M: Eq + Copy,
{
    /// Returns the member that was displaced, if any.
    pub fn activate(&mut self, group: G, member: M) -> Option<M> {
        self.active.insert(group, member).filter(|previous| *previous != member)
    }

    /// Returns whether `member` was active.
    pub fn deactivate(&mut self, group: G, member: M) -> bool {
        if self.is_active(group, member) {
            self.active.remove(&group);
            true
        } else {
            false
        }
    }

    /// Flip `member` and return its new state.
    pub fn toggle(&mut self, group: G, member: M) -> bool {
        if self.deactivate(group, member) {
            false
        } else {
            self.activate(group, member);
            true
        }
    }

    pub fn is_active(&self, group: G, member: M) -> bool {
        self.active.get(&group) == Some(&member)
    }

    pub fn active(&self, group: G) -> Option<M> {
        self.active.get(&group).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Home,
    Back,
    Forward,
    Readout,
    Pan,
    Zoom,
    Save,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolGroup {
    /// Readout, pan and zoom: at most one at a time.
    Navigation,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::Home,
        Tool::Back,
        Tool::Forward,
        Tool::Readout,
        Tool::Pan,
        Tool::Zoom,
        Tool::Save,
    ];

    pub fn group(self) -> Option<ToolGroup> {
        match self {
            Tool::Readout | Tool::Pan | Tool::Zoom => Some(ToolGroup::Navigation),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Home => "Home",
            Tool::Back => "Back",
            Tool::Forward => "Forward",
            Tool::Readout => "Coordinates",
            Tool::Pan => "Pan",
            Tool::Zoom => "Zoom",
            Tool::Save => "Save",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    opening: bool,
    started_at: f64,
    duration: f64,
}

/// Expand/collapse state of the toolbar menu.
///
/// Time is supplied by the host in seconds. Requests made while a transition
/// runs are dropped, not queued.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarMenu {
    tools: Vec<Tool>,
    open_height: f32,
    open_duration: f64,
    close_duration: f64,
    is_open: bool,
    transition: Option<Transition>,
}

impl ToolbarMenu {
    pub fn new(tools: Vec<Tool>, config: &ChartConfig) -> Self {
        Self {
            tools,
            open_height: config.menu_open_height,
            open_duration: config.menu_open_duration,
            close_duration: config.menu_close_duration,
            is_open: false,
            transition: None,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    #[inline]
    pub fn in_motion(&self) -> bool {
        self.transition.is_some()
    }

    #[inline]
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    fn start(&mut self, opening: bool, now: f64) -> bool {
        if self.transition.is_some() || self.is_open == opening {
            return false;
        }
        let duration = if opening {
            self.open_duration
        } else {
            self.close_duration
        };
        self.transition = Some(Transition {
            opening,
            started_at: now,
            duration,
        });

        true
    }

    pub fn open(&mut self, now: f64) -> bool {
        self.start(true, now)
    }

    pub fn close(&mut self, now: f64) -> bool {
        self.start(false, now)
    }

    pub fn toggle(&mut self, now: f64) -> bool {
        if self.is_open {
            self.close(now)
        } else {
            self.open(now)
        }
    }

    /// Linear progress of the running transition in `0..=1`.
    pub fn progress(&self, now: f64) -> f32 {
        match self.transition {
            Some(t) if t.duration > 0.0 => ((now - t.started_at) / t.duration).clamp(0.0, 1.0) as f32,
            Some(_) => 1.0,
            None => 0.0,
        }
    }

    /// Advance time. Returns `true` when a transition completed.
    pub fn tick(&mut self, now: f64) -> bool {
        if self.transition.is_none() || self.progress(now) < 1.0 {
            return false;
        }
        self.transition = None;
        self.is_open = !self.is_open;

        true
    }

    pub fn height(&self, now: f64) -> f32 {
        match self.transition {
            Some(t) if t.opening => self.open_height * self.progress(now),
            Some(_) => self.open_height * (1.0 - self.progress(now)),
            None if self.is_open => self.open_height,
            None => 0.0,
        }
    }

    /// Tools currently shown. While opening, tool `i` appears once progress
    /// reaches `(i + 1) / len`; closing removes them from the end.
    pub fn visible_tools(&self, now: f64) -> &[Tool] {
        let len = self.tools.len();
        let revealed = |p: f32| ((p * len as f32 + 1e-4).floor() as usize).min(len);
        let count = match self.transition {
            Some(t) if t.opening => revealed(self.progress(now)),
            Some(_) => len - revealed(self.progress(now)),
            None if self.is_open => len,
            None => 0,
        };

        &self.tools[..count]
    }
}

/// Action the chart performs in response to a toolbar press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarCommand {
    Home,
    Back,
    Forward,
    TogglePan,
    ToggleZoom,
    /// Show or hide the coordinate readout.
    ShowReadout(bool),
    /// Leave pan or zoom mode.
    ResetMode,
    Save,
}

#[derive(Debug, Clone)]
pub struct Toolbar {
    toggles: ToggleGroups<ToolGroup, Tool>,
    menu: ToolbarMenu,
}

impl Toolbar {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            toggles: ToggleGroups::default(),
            menu: ToolbarMenu::new(Tool::ALL.to_vec(), config),
        }
    }

    #[inline]
    pub fn menu(&self) -> &ToolbarMenu {
        &self.menu
    }

    #[inline]
    pub fn menu_mut(&mut self) -> &mut ToolbarMenu {
        &mut self.menu
    }

    pub fn is_active(&self, tool: Tool) -> bool {
        tool.group()
            .is_some_and(|group| self.toggles.is_active(group, tool))
    }

    /// Update button states for a press on `tool` and return the commands
    /// to apply, in order.
    pub fn press(&mut self, tool: Tool) -> Vec<ToolbarCommand> {
        let Some(group) = tool.group() else {
            return vec![match tool {
                Tool::Home => ToolbarCommand::Home,
                Tool::Back => ToolbarCommand::Back,
                Tool::Forward => ToolbarCommand::Forward,
                _ => ToolbarCommand::Save,
            }];
        };

        let readout_was_active = self.toggles.is_active(group, Tool::Readout);
        let active = self.toggles.toggle(group, tool);

        match tool {
            Tool::Readout if active => vec![ToolbarCommand::ShowReadout(true), ToolbarCommand::ResetMode],
            Tool::Readout => vec![ToolbarCommand::ShowReadout(false)],
            _ => {
                let mut commands = Vec::with_capacity(2);
                if readout_was_active {
                    commands.push(ToolbarCommand::ShowReadout(false));
                }
                commands.push(if tool == Tool::Pan {
                    ToolbarCommand::TogglePan
                } else {
                    ToolbarCommand::ToggleZoom
                });
                commands
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Group {
        Left,
        Right,
    }

    #[test]
    fn activation_is_exclusive_within_group() {
        let mut groups = ToggleGroups::default();
        assert_eq!(groups.activate(Group::Left, 1), None);
        assert_eq!(groups.activate(Group::Right, 7), None);
        assert_eq!(groups.activate(Group::Left, 2), Some(1));
        assert!(!groups.is_active(Group::Left, 1));
        assert!(groups.is_active(Group::Left, 2));
        assert!(groups.is_active(Group::Right, 7));

        assert!(!groups.toggle(Group::Left, 2));
        assert_eq!(groups.active(Group::Left), None);
        assert_eq!(groups.active(Group::Right), Some(7));
        assert!(!groups.deactivate(Group::Right, 3));
    }

    #[test]
    fn menu_ignores_requests_while_moving() {
        let mut menu = ToolbarMenu::new(Tool::ALL.to_vec(), &ChartConfig::default());
        assert!(menu.open(0.0));
        assert!(!menu.close(0.05));
        assert!(!menu.open(0.05));
        assert!((menu.height(0.05) - 50.0).abs() < 1e-3);
        assert!(!menu.tick(0.05));
        assert!(!menu.is_open());

        assert!(menu.tick(0.1));
        assert!(menu.is_open());
        assert_eq!(menu.height(0.2), 100.0);
        assert_eq!(menu.visible_tools(0.2).len(), 7);

        assert!(menu.toggle(1.0));
        assert!(menu.tick(1.2));
        assert!(!menu.is_open());
        assert!(menu.visible_tools(1.3).is_empty());
    }

    #[test]
    fn menu_reveals_tools_progressively() {
        let tools = vec![Tool::Home, Tool::Pan, Tool::Zoom, Tool::Save];
        let mut menu = ToolbarMenu::new(tools, &ChartConfig::default());
        menu.open(0.0);
        assert_eq!(menu.visible_tools(0.0), &[] as &[Tool]);
        assert_eq!(menu.visible_tools(0.05), &[Tool::Home, Tool::Pan]);
        menu.tick(0.1);
        menu.close(1.0);
        assert_eq!(menu.visible_tools(1.075), &[Tool::Home]);
    }

    #[test]
    fn pan_press_clears_readout() {
        let mut toolbar = Toolbar::new(&ChartConfig::default());
        assert_eq!(
            toolbar.press(Tool::Readout),
            vec![ToolbarCommand::ShowReadout(true), ToolbarCommand::ResetMode]
        );
        assert!(toolbar.is_active(Tool::Readout));

        assert_eq!(
            toolbar.press(Tool::Pan),
            vec![ToolbarCommand::ShowReadout(false), ToolbarCommand::TogglePan]
        );
        assert!(toolbar.is_active(Tool::Pan));
        assert!(!toolbar.is_active(Tool::Readout));

        assert_eq!(toolbar.press(Tool::Zoom), vec![ToolbarCommand::ToggleZoom]);
        assert!(!toolbar.is_active(Tool::Pan));
        assert_eq!(toolbar.press(Tool::Zoom), vec![ToolbarCommand::ToggleZoom]);
        assert!(!toolbar.is_active(Tool::Zoom));

        assert_eq!(toolbar.press(Tool::Home), vec![ToolbarCommand::Home]);
        assert_eq!(toolbar.press(Tool::Save), vec![ToolbarCommand::Save]);
    }
}
