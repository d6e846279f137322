//! Interactive controller for human players
//!
//! Presents a one-line menu of currently legal choices and reads the pick
//! through a [`LineReader`], so the same code path serves stdin play and
//! scripted tests. Illegal or malformed input re-prompts without touching
//! game state; the controller only ever returns a well-formed action.

use crate::bonus::BonusKind;
use crate::core::Bid;
use crate::error::Result;
use crate::game::controller::{GameStateView, PlayerAction, PlayerController};
use crate::game::input::{read_int_in_range, LineReader, StdinReader};
use std::fmt::Write as FmtWrite;

/// A controller that prompts a human player for decisions
pub struct InteractiveController<R: LineReader> {
    reader: R,
}

impl InteractiveController<StdinReader> {
    /// Interactive play over process stdin
    pub fn stdin() -> Self {
        InteractiveController::new(StdinReader::new())
    }
}

impl<R: LineReader> InteractiveController<R> {
    pub fn new(reader: R) -> Self {
        InteractiveController { reader }
    }

    /// Build the menu of choices legal right now
    ///
    /// Challenges appear only once a bid stands; bonus entries only while
    /// the wallet conjunction holds (and, for peek, a live bot exists).
    fn menu_line(view: &GameStateView, can_reroll: bool, can_peek: bool) -> String {
        let mut menu = String::from("Choose: [B]id");
        if view.current_bid().is_some() {
            menu.push_str(", [L]iar, [E]xact");
        }
        if can_reroll {
            if let Some(wallet) = view.wallet() {
                let _ = write!(menu, ", [R]eroll (have {})", wallet.remaining(BonusKind::Reroll));
            }
        }
        if can_peek {
            if let Some(wallet) = view.wallet() {
                let _ = write!(menu, ", [P]eek bot (have {})", wallet.remaining(BonusKind::Peek));
            }
        }
        menu
    }

    fn read_bid(&mut self, view: &GameStateView) -> Result<Bid> {
        let quantity = read_int_in_range(&mut self.reader, view.logger(), "Quantity: ", 1, 200)?;
        let face = read_int_in_range(&mut self.reader, view.logger(), "Face (1..6): ", 1, 6)?;
        Ok(Bid::new(quantity, face as u8)?)
    }

    fn read_peek_target(&mut self, view: &GameStateView) -> Result<usize> {
        let bots = view.alive_bot_indexes();
        view.logger().normal("Choose bot to peek:");
        for (i, seat) in bots.iter().enumerate() {
            view.logger().normal(&format!(
                "  {}) {}",
                i + 1,
                view.player_name(*seat).unwrap_or("")
            ));
        }
        let choice = read_int_in_range(
            &mut self.reader,
            view.logger(),
            "Bot number: ",
            1,
            bots.len() as u32,
        )?;
        Ok(bots[choice as usize - 1])
    }
}

impl<R: LineReader> PlayerController for InteractiveController<R> {
    fn choose_action(&mut self, view: &GameStateView) -> Result<PlayerAction> {
        loop {
            let has_bid = view.current_bid().is_some();
            let can_reroll = view
                .wallet()
                .map_or(false, |w| w.can_use(BonusKind::Reroll));
            let can_peek = view.wallet().map_or(false, |w| w.can_use(BonusKind::Peek))
                && view.has_alive_bots();

            view.logger()
                .normal(&Self::menu_line(view, can_reroll, can_peek));

            let line = self.reader.read_line("> ")?;
            let Some(choice) = line.chars().next().map(|c| c.to_ascii_uppercase()) else {
                continue;
            };

            if choice == 'R' && can_reroll {
                return Ok(PlayerAction::UseBonus {
                    kind: BonusKind::Reroll,
                    target: None,
                });
            }

            if choice == 'P' && can_peek {
                let target = self.read_peek_target(view)?;
                return Ok(PlayerAction::UseBonus {
                    kind: BonusKind::Peek,
                    target: Some(target),
                });
            }

            if choice == 'B' {
                return Ok(PlayerAction::Bid(self.read_bid(view)?));
            }

            if has_bid && choice == 'L' {
                return Ok(PlayerAction::Liar);
            }

            if has_bid && choice == 'E' {
                return Ok(PlayerAction::Exact);
            }

            view.logger().normal("Invalid choice.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bonus::BonusWallet;
    use crate::core::{AccountId, Player};
    use crate::game::input::ScriptedReader;
    use crate::game::GameState;

    fn human_and_bot(reroll: u32, peek: u32) -> GameState {
        let wallet = BonusWallet::new(AccountId::new("acct-1"), reroll, peek);
        let mut state = GameState::new(vec![
            Player::new_human("Alice", wallet, 5),
            Player::new_bot("Bot1", 5),
        ]);
        state.logger.enable_capture();
        state
    }

    fn controller(lines: &[&str]) -> InteractiveController<ScriptedReader> {
        InteractiveController::new(ScriptedReader::new(lines.iter().copied()))
    }

    #[test]
    fn test_bid_entry() {
        let state = human_and_bot(0, 0);
        let view = crate::game::GameStateView::new(&state, 0);

        let mut ctrl = controller(&["B", "3", "4"]);
        let action = ctrl.choose_action(&view).unwrap();
        assert_eq!(action, PlayerAction::Bid(Bid::new(3, 4).unwrap()));
    }

    #[test]
    fn test_challenges_require_standing_bid() {
        let state = human_and_bot(0, 0);
        let view = crate::game::GameStateView::new(&state, 0);

        // Liar is not on the menu yet, so it re-prompts and the bid goes in
        let mut ctrl = controller(&["L", "B", "1", "2"]);
        let action = ctrl.choose_action(&view).unwrap();
        assert_eq!(action, PlayerAction::Bid(Bid::new(1, 2).unwrap()));
        assert!(state
            .logger
            .logs()
            .iter()
            .any(|l| l.message == "Invalid choice."));
    }

    #[test]
    fn test_challenges_with_standing_bid() {
        let mut state = human_and_bot(0, 0);
        state.round.set_bid(Bid::new(2, 3).unwrap(), 1);

        let view = crate::game::GameStateView::new(&state, 0);
        let mut ctrl = controller(&["L"]);
        assert_eq!(ctrl.choose_action(&view).unwrap(), PlayerAction::Liar);

        let view = crate::game::GameStateView::new(&state, 0);
        let mut ctrl = controller(&["e"]);
        assert_eq!(ctrl.choose_action(&view).unwrap(), PlayerAction::Exact);
    }

    #[test]
    fn test_reroll_when_available() {
        let state = human_and_bot(2, 0);
        let view = crate::game::GameStateView::new(&state, 0);

        let mut ctrl = controller(&["R"]);
        assert_eq!(
            ctrl.choose_action(&view).unwrap(),
            PlayerAction::UseBonus {
                kind: BonusKind::Reroll,
                target: None
            }
        );
    }

    #[test]
    fn test_reroll_rejected_without_entitlement() {
        let state = human_and_bot(0, 0);
        let view = crate::game::GameStateView::new(&state, 0);

        let mut ctrl = controller(&["R", "B", "1", "2"]);
        let action = ctrl.choose_action(&view).unwrap();
        assert_eq!(action, PlayerAction::Bid(Bid::new(1, 2).unwrap()));
    }

    #[test]
    fn test_peek_flow_lists_bots() {
        let state = human_and_bot(0, 1);
        let view = crate::game::GameStateView::new(&state, 0);

        let mut ctrl = controller(&["P", "1"]);
        let action = ctrl.choose_action(&view).unwrap();
        assert_eq!(
            action,
            PlayerAction::UseBonus {
                kind: BonusKind::Peek,
                target: Some(1)
            }
        );
        assert!(state
            .logger
            .logs()
            .iter()
            .any(|l| l.message == "Choose bot to peek:"));
        assert!(state.logger.logs().iter().any(|l| l.message == "  1) Bot1"));
    }

    #[test]
    fn test_peek_hidden_without_live_bots() {
        let wallet = BonusWallet::new(AccountId::new("acct-1"), 0, 3);
        let other = BonusWallet::empty(AccountId::new("acct-2"));
        let mut state = GameState::new(vec![
            Player::new_human("Alice", wallet, 5),
            Player::new_human("Bea", other, 5),
        ]);
        state.logger.enable_capture();

        let view = crate::game::GameStateView::new(&state, 0);
        let mut ctrl = controller(&["P", "B", "1", "2"]);
        let action = ctrl.choose_action(&view).unwrap();
        assert_eq!(action, PlayerAction::Bid(Bid::new(1, 2).unwrap()));
    }

    #[test]
    fn test_malformed_numbers_reprompt() {
        let state = human_and_bot(0, 0);
        let view = crate::game::GameStateView::new(&state, 0);

        let mut ctrl = controller(&["B", "abc", "2", "9", "4"]);
        let action = ctrl.choose_action(&view).unwrap();
        assert_eq!(action, PlayerAction::Bid(Bid::new(2, 4).unwrap()));

        let logs = state.logger.logs();
        assert!(logs.iter().any(|l| l.message == "Not a number."));
        assert!(logs.iter().any(|l| l.message == "Enter a number in [1..6]."));
    }

    #[test]
    fn test_menu_shows_full_set() {
        let mut state = human_and_bot(2, 1);
        state.round.set_bid(Bid::new(1, 5).unwrap(), 1);

        let view = crate::game::GameStateView::new(&state, 0);
        let mut ctrl = controller(&["L"]);
        ctrl.choose_action(&view).unwrap();

        assert!(state.logger.logs().iter().any(|l| l.message
            == "Choose: [B]id, [L]iar, [E]xact, [R]eroll (have 2), [P]eek bot (have 1)"));
    }

    #[test]
    fn test_blank_line_reprompts() {
        let state = human_and_bot(0, 0);
        let view = crate::game::GameStateView::new(&state, 0);

        let mut ctrl = controller(&["", "B", "1", "3"]);
        let action = ctrl.choose_action(&view).unwrap();
        assert_eq!(action, PlayerAction::Bid(Bid::new(1, 3).unwrap()));
    }

    #[test]
    fn test_exhausted_input_propagates() {
        let state = human_and_bot(0, 0);
        let view = crate::game::GameStateView::new(&state, 0);

        let mut ctrl = controller(&[]);
        assert!(ctrl.choose_action(&view).is_err());
    }
}
