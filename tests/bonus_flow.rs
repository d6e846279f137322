//! End-to-end bonus flow tests
//!
//! Runs whole matches with scripted seats and checks the reroll/peek
//! entitlement chain: wallet and store must agree, a charge spends once per
//! match, and a denied request leaves every ledger untouched.

use perudo_rs::bonus::{BonusKind, BonusStore, BonusWallet, MemoryBonusStore};
use perudo_rs::core::{AccountId, Bid, Player};
use perudo_rs::game::{
    GameLoop, GameState, OutputMode, PlayerAction, PlayerController, ScriptedController,
};

fn bid(quantity: u32, face: u8) -> PlayerAction {
    PlayerAction::Bid(Bid::new(quantity, face).unwrap())
}

fn reroll() -> PlayerAction {
    PlayerAction::UseBonus {
        kind: BonusKind::Reroll,
        target: None,
    }
}

fn peek(target: usize) -> PlayerAction {
    PlayerAction::UseBonus {
        kind: BonusKind::Peek,
        target: Some(target),
    }
}

fn scripted(actions: Vec<PlayerAction>) -> Box<dyn PlayerController> {
    Box::new(ScriptedController::new(actions))
}

fn captured_game(players: Vec<Player>, seed: u64) -> GameState {
    let mut game = GameState::new(players);
    game.seed_rng(seed);
    game.logger.set_output_mode(OutputMode::Memory);
    game.logger.enable_capture();
    game
}

fn transcript(game: &GameState) -> Vec<String> {
    game.logger.logs().iter().map(|e| e.message.clone()).collect()
}

#[test]
fn test_one_entitlement_spends_once_and_denies_the_retry() {
    let account = AccountId::new("ana");
    let mut game = captured_game(
        vec![
            Player::new_human("Ana", BonusWallet::new(account.clone(), 1, 0), 5),
            Player::new_bot("Bot1", 5),
        ],
        42,
    );
    let mut store = MemoryBonusStore::new();
    store.grant(account.clone(), BonusKind::Reroll, 1);

    // Back-to-back reroll requests; the second must bounce off the
    // once-per-match flag. Ana then bids an impossible 11 dice every round,
    // which loses her the match deterministically whatever the dice say.
    let mut controllers = vec![
        scripted(vec![
            reroll(),
            reroll(),
            bid(11, 2),
            bid(11, 2),
            bid(11, 2),
            bid(11, 2),
            bid(11, 2),
        ]),
        scripted(vec![]),
    ];

    let result = {
        let mut game_loop = GameLoop::new(&mut game, &mut store);
        game_loop.run_match(&mut controllers).unwrap()
    };
    assert_eq!(result.winner, Some(1));

    let lines = transcript(&game);
    assert_eq!(
        lines
            .iter()
            .filter(|l| l.starts_with("Ana used REROLL. New dice: ["))
            .count(),
        1
    );
    assert_eq!(
        lines
            .iter()
            .filter(|l| *l == "REROLL not available (0 in inventory or already used this match).")
            .count(),
        1
    );

    let wallet = game.players[0].wallet().unwrap();
    assert_eq!(wallet.remaining(BonusKind::Reroll), 0);
    assert_eq!(store.remaining_count(&account, BonusKind::Reroll), 0);
}

#[test]
fn test_store_desync_denies_without_touching_the_wallet() {
    let account = AccountId::new("ana");
    let mut game = captured_game(
        vec![
            Player::new_human("Ana", BonusWallet::new(account.clone(), 1, 0), 5),
            Player::new_bot("Bot1", 5),
        ],
        43,
    );
    // The wallet says one reroll, the store says none.
    let mut store = MemoryBonusStore::new();

    let mut controllers = vec![scripted(vec![reroll(), bid(11, 2)]), scripted(vec![])];

    {
        let mut game_loop = GameLoop::new(&mut game, &mut store);
        game_loop.run_match(&mut controllers).unwrap();
    }

    let lines = transcript(&game);
    assert!(lines
        .iter()
        .any(|l| l == "REROLL not available in store (inventory desync)."));
    assert!(!lines.iter().any(|l| l.contains("used REROLL")));

    let wallet = game.players[0].wallet().unwrap();
    assert_eq!(wallet.remaining(BonusKind::Reroll), 1);
    assert!(wallet.can_use(BonusKind::Reroll));
}

#[test]
fn test_peek_reveals_the_bot_and_turn_stays_with_the_human() {
    let account = AccountId::new("ana");
    // Seat the human between the bots so she always gets a turn in round
    // one: Bot1 has exactly one bid scripted and Bot2 only ever challenges.
    let mut game = captured_game(
        vec![
            Player::new_bot("Bot1", 5),
            Player::new_human("Ana", BonusWallet::new(account.clone(), 0, 1), 5),
            Player::new_bot("Bot2", 5),
        ],
        44,
    );
    let mut store = MemoryBonusStore::new();
    store.grant(account.clone(), BonusKind::Peek, 1);

    let mut controllers = vec![
        scripted(vec![bid(3, 2)]),
        scripted(vec![peek(1), peek(0), bid(11, 2)]),
        scripted(vec![]),
    ];

    {
        let mut game_loop = GameLoop::new(&mut game, &mut store);
        game_loop.run_match(&mut controllers).unwrap();
    }

    let lines = transcript(&game);
    // Peeking herself bounces, peeking the bot reveals it.
    assert!(lines.iter().any(|l| l == "You can peek only an alive bot."));
    let used = lines
        .iter()
        .position(|l| l == "Ana used PEEK.")
        .expect("peek must succeed");
    assert!(lines[used + 1].starts_with("Peek Bot1 dice: ["));

    // The peek did not end Ana's turn: her own bid comes next, with no
    // other seat bidding in between.
    let ana_bid = lines
        .iter()
        .position(|l| l == "Ana bids: 11 x 2's")
        .expect("the peeking seat must still bid");
    assert!(used < ana_bid);
    assert!(!lines[used..ana_bid]
        .iter()
        .any(|l| l.contains(" bids: ") && !l.starts_with("Ana ")));

    let wallet = game.players[1].wallet().unwrap();
    assert_eq!(wallet.remaining(BonusKind::Peek), 0);
    assert_eq!(store.remaining_count(&account, BonusKind::Peek), 0);
}

#[test]
fn test_reroll_keeps_pool_size_and_claim_untouched() {
    let account = AccountId::new("ana");
    let mut game = captured_game(
        vec![
            Player::new_bot("Bot1", 5),
            Player::new_human("Ana", BonusWallet::new(account.clone(), 1, 0), 5),
            Player::new_bot("Bot2", 5),
        ],
        45,
    );
    let mut store = MemoryBonusStore::new();
    store.grant(account.clone(), BonusKind::Reroll, 1);

    let mut controllers = vec![
        scripted(vec![bid(3, 2)]),
        scripted(vec![reroll(), bid(11, 2)]),
        scripted(vec![]),
    ];

    {
        let mut game_loop = GameLoop::new(&mut game, &mut store);
        game_loop.run_match(&mut controllers).unwrap();
    }

    let lines = transcript(&game);
    let used = lines
        .iter()
        .position(|l| l.starts_with("Ana used REROLL. New dice: ["))
        .expect("reroll must succeed");

    // Five dice went in, five came out.
    let dice_part = &lines[used][lines[used].find('[').unwrap()..];
    assert_eq!(dice_part.matches(',').count(), 4);

    // The turn stayed with Ana: her raise is the next bid after the reroll.
    assert!(lines[used..].iter().any(|l| l == "Ana bids: 11 x 2's"));
}
