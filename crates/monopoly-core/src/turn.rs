//! Turn engine: resolves exactly one turn for the token.
//!
//! A turn is either a jail turn (token on the jail cell) or a free turn.
//! Free turns track the doubles streak, move forward, count laps, handle
//! the go-to-jail tile and draw cards. Jail turns spend an escape card,
//! wait out patience, or leave on a double, and never draw cards.

use crate::board::Board;
use crate::card::{CardKind, Destination};
use crate::deck::{DeckKind, Decks};
use crate::dice::{DiceSource, Roll};
use crate::error::{LookupError, SimError};
use crate::events::{JailReason, JailRelease, TurnEvent, TurnOutcome};
use crate::player::{PlayerState, JAIL_PATIENCE, MAX_DOUBLES};
use crate::stats::{LapSnapshot, VisitStats};
use crate::tile::Tile;
use rand::Rng;

/// Roll the dice and resolve one turn.
///
/// Mutates the player, the decks and the visit counters. Lap snapshots taken
/// during the turn are returned in the outcome for the caller to keep.
pub fn execute_turn<D, R>(
    player: &mut PlayerState,
    board: &Board,
    decks: &mut Decks,
    stats: &mut VisitStats,
    dice: &mut D,
    rng: &mut R,
) -> Result<TurnOutcome, SimError>
where
    D: DiceSource,
    R: Rng + ?Sized,
{
    if player.position >= board.len() {
        return Err(SimError::PositionOutOfBounds {
            position: player.position,
            len: board.len(),
        });
    }

    let roll = dice.roll(rng);

    let mut turn = Turn {
        player,
        board,
        decks,
        stats,
        rng,
        events: Vec::new(),
        snapshots: Vec::new(),
    };
    turn.play(roll)?;

    Ok(TurnOutcome {
        roll,
        events: turn.events,
        snapshots: turn.snapshots,
    })
}

/// Borrowed state for the duration of one turn
struct Turn<'a, R: ?Sized> {
    player: &'a mut PlayerState,
    board: &'a Board,
    decks: &'a mut Decks,
    stats: &'a mut VisitStats,
    rng: &'a mut R,
    events: Vec<TurnEvent>,
    snapshots: Vec<LapSnapshot>,
}

impl<R: Rng + ?Sized> Turn<'_, R> {
    fn play(&mut self, roll: Roll) -> Result<(), SimError> {
        if self.player.is_jailed(self.board.jail_index()) {
            self.player.doubles_streak = 0;
            self.player.roll_history.push(roll.total());
            return self.jail_turn(roll);
        }

        if roll.is_double() {
            self.player.doubles_streak += 1;
            self.events.push(TurnEvent::DoublesRolled {
                streak: self.player.doubles_streak,
            });
        } else {
            self.player.doubles_streak = 0;
        }

        // The triggering roll is not recorded and the token does not move
        if self.player.doubles_streak >= MAX_DOUBLES {
            self.player.doubles_streak = 0;
            return self.send_to_jail(JailReason::ThreeDoubles);
        }

        self.player.roll_history.push(roll.total());
        self.regular_move(usize::from(roll.total()))
    }

    fn jail_turn(&mut self, roll: Roll) -> Result<(), SimError> {
        let via = if let Some(held) = self.player.take_escape_card() {
            self.decks.get_mut(held.deck).discard(held.card);
            JailRelease::Card(held.deck)
        } else if self.player.jail_patience > 0 && !roll.is_double() {
            self.player.jail_patience -= 1;
            self.events.push(TurnEvent::StayedInJail {
                patience_left: self.player.jail_patience,
            });
            return Ok(());
        } else if roll.is_double() {
            JailRelease::Doubles
        } else {
            JailRelease::PatienceExhausted
        };

        self.player.jail_patience = JAIL_PATIENCE;
        self.events.push(TurnEvent::LeftJail { via });

        let target = self.advance(usize::from(roll.total()));
        self.move_to(target);
        self.visit(target)
    }

    fn regular_move(&mut self, steps: usize) -> Result<(), SimError> {
        let mut target = self.advance(steps);

        // A free token stepping onto the cell is only visiting
        if target == self.board.jail_index() {
            target = (target + 1) % self.board.len();
        }
        self.move_to(target);

        if target == self.board.go_to_jail_index() {
            self.visit(target)?;
            return self.send_to_jail(JailReason::GoToJailTile);
        }
        self.visit(target)?;

        match DeckKind::for_tile(tile(self.board, target)?.category) {
            Some(deck) => self.resolve_card(deck),
            None => Ok(()),
        }
    }

    fn resolve_card(&mut self, deck: DeckKind) -> Result<(), SimError> {
        let card = self.decks.get_mut(deck).draw(&mut *self.rng)?;
        self.events.push(TurnEvent::CardDrawn {
            deck,
            text: card.text.clone(),
        });

        if card.is_escape() {
            self.player.hold(card, deck);
            self.events.push(TurnEvent::EscapeCardKept { deck });
            return Ok(());
        }

        if let CardKind::Travel(destination) = &card.kind {
            self.travel(destination)?;
        }
        self.decks.get_mut(deck).discard(card);
        Ok(())
    }

    fn travel(&mut self, destination: &Destination) -> Result<(), SimError> {
        match destination {
            Destination::StepsBack(steps) => {
                let len = self.board.len();
                let target = (self.player.position + len - steps % len) % len;
                self.move_to(target);

                if target == self.board.go_to_jail_index() {
                    self.visit(target)?;
                    return self.send_to_jail(JailReason::GoToJailTile);
                }
                self.visit(target)
            }
            Destination::Nearest(category) => {
                let target = self
                    .board
                    .nearest(*category, self.player.position)
                    .ok_or(LookupError::NoTilesOfCategory(*category))?;
                self.jump(target)
            }
            Destination::Named(name) => {
                let target = self
                    .board
                    .index_of(name)
                    .ok_or_else(|| LookupError::UnknownDestination(name.clone()))?;
                self.jump(target)
            }
        }
    }

    /// Move straight to `target`, counting a lap when that means going
    /// round the board (never when the target is the jail).
    fn jump(&mut self, target: usize) -> Result<(), SimError> {
        let jail = self.board.jail_index();
        if target == jail {
            self.events.push(TurnEvent::SentToJail {
                reason: JailReason::Card,
            });
        } else if self.player.position > target {
            self.complete_lap();
        }
        self.move_to(target);
        self.visit(target)
    }

    fn send_to_jail(&mut self, reason: JailReason) -> Result<(), SimError> {
        let jail = self.board.jail_index();
        self.events.push(TurnEvent::SentToJail { reason });
        self.move_to(jail);
        self.visit(jail)
    }

    /// Position `steps` ahead, closing a lap if that wraps past the start
    fn advance(&mut self, steps: usize) -> usize {
        let len = self.board.len();
        let raw = self.player.position + steps;
        if raw >= len {
            self.complete_lap();
        }
        raw % len
    }

    fn complete_lap(&mut self) {
        self.snapshots
            .push(self.stats.snapshot(self.player.laps_completed));
        self.player.laps_completed += 1;
        self.events.push(TurnEvent::PassedStart {
            laps_completed: self.player.laps_completed,
        });
    }

    fn move_to(&mut self, target: usize) {
        let from = self.player.position;
        self.player.position = target;
        self.events.push(TurnEvent::Moved { from, to: target });
    }

    fn visit(&mut self, index: usize) -> Result<(), SimError> {
        let tile = tile(self.board, index)?;
        self.stats.record(&tile.label)
    }
}

fn tile(board: &Board, index: usize) -> Result<&Tile, SimError> {
    board.tile_at(index).ok_or(SimError::PositionOutOfBounds {
        position: index,
        len: board.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;
    use crate::deck::Deck;
    use crate::dice::LoadedDice;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const QUIET: &str = "Pay poor tax of $15;Money;Player;Bank;15\n\
                         Bank pays you dividend of $50;Money;Bank;Player;50\n";

    struct Table {
        board: Board,
        decks: Decks,
        stats: VisitStats,
        player: PlayerState,
        rng: StdRng,
    }

    impl Table {
        fn new(board: Board, chance: &str, community_chest: &str) -> Self {
            let stats = VisitStats::new(&board);
            Self {
                board,
                decks: Decks::new(
                    Deck::parse(DeckKind::Chance, chance).unwrap(),
                    Deck::parse(DeckKind::CommunityChest, community_chest).unwrap(),
                ),
                stats,
                player: PlayerState::new(),
                rng: StdRng::seed_from_u64(99),
            }
        }

        fn quiet() -> Self {
            Self::new(Board::reference(), QUIET, QUIET)
        }

        fn with_chance(chance: &str) -> Self {
            Self::new(Board::reference(), chance, QUIET)
        }

        fn at(mut self, position: usize) -> Self {
            self.player.position = position;
            self
        }

        fn turn(&mut self, die1: u8, die2: u8) -> TurnOutcome {
            let mut dice = LoadedDice::new([(die1, die2)]);
            execute_turn(
                &mut self.player,
                &self.board,
                &mut self.decks,
                &mut self.stats,
                &mut dice,
                &mut self.rng,
            )
            .unwrap()
        }
    }

    fn forty_tile_board() -> Board {
        let source: String = crate::reference::BOARD
            .lines()
            .filter(|line| !line.starts_with("T2,"))
            .map(|line| format!("{line}\n"))
            .collect();
        Board::parse(&source).unwrap()
    }

    #[test]
    fn test_wrap_past_start_takes_one_snapshot() {
        let board = forty_tile_board();
        assert_eq!(board.len(), 40);
        assert_eq!(board.jail_index(), 10);
        assert_eq!(board.go_to_jail_index(), 31);

        let mut table = Table::new(board, QUIET, QUIET).at(38);
        table.stats.record("Go").unwrap();
        let outcome = table.turn(2, 3);

        assert_eq!(table.player.position, 3);
        assert_eq!(table.player.laps_completed, 1);
        assert_eq!(outcome.snapshots.len(), 1);
        assert_eq!(outcome.snapshots[0].lap, 0);
        // snapshot is taken before the landing is counted
        assert_eq!(outcome.snapshots[0].visits["A2"], 0);
        assert_eq!(outcome.snapshots[0].visits["Go"], 1);
        assert_eq!(table.stats.get("A2"), 1);
    }

    #[test]
    fn test_plain_move_records_roll_and_visit() {
        let mut table = Table::quiet();
        let outcome = table.turn(1, 3);

        assert_eq!(table.player.position, 4);
        assert_eq!(table.player.roll_history, vec![4]);
        assert_eq!(table.stats.get("T1"), 1);
        assert_eq!(table.stats.total(), 1);
        assert!(!outcome.completed_lap());
        assert_eq!(outcome.events, vec![TurnEvent::Moved { from: 0, to: 4 }]);
    }

    #[test]
    fn test_three_spaces_back() {
        let mut table = Table::with_chance("Go Back 3 Spaces;Travel;3 Spaces\n").at(4);
        let outcome = table.turn(1, 2);

        assert_eq!(table.player.position, 4);
        assert_eq!(table.stats.get("CH1"), 1);
        assert_eq!(table.stats.get("T1"), 1);
        assert!(!outcome.completed_lap());
        // travel card goes straight to the discard pile
        assert_eq!(table.decks.chance.discard_len(), 1);
        assert_eq!(table.decks.chance.draw_len(), 0);
    }

    #[test]
    fn test_three_spaces_onto_go_to_jail() {
        let board = Board::parse(
            "Go\nA1,Baltic Avenue,Property,60,50,4,20,60,180,320,450,30\nJail\nVisiting Jail\n\
             Go To Jail\nT1,Income Tax,Tax\nB1,Oriental Avenue,Property,100,50,6,30,90,270,400,550,50\n\
             CH1,Chance,Chance\nH2,Boardwalk,Property,400,200,50,200,600,1400,1700,2000,200\n",
        )
        .unwrap();
        let mut table = Table::new(board, "Go Back 3 Spaces;Travel;3 Spaces\n", QUIET).at(5);
        let outcome = table.turn(1, 1);

        assert_eq!(table.player.position, 2);
        assert_eq!(table.stats.get("Go To Jail"), 1);
        assert_eq!(table.stats.get("Jail"), 1);
        assert!(outcome.went_to_jail());
    }

    #[test]
    fn test_three_doubles_go_to_jail() {
        let mut table = Table::quiet();
        table.turn(1, 1);
        table.turn(2, 2);
        assert_eq!(table.player.doubles_streak, 2);
        let position_before = table.player.position;
        assert_eq!(position_before, 6);

        let outcome = table.turn(3, 3);
        assert_eq!(table.player.position, 10);
        assert_eq!(table.player.doubles_streak, 0);
        assert_eq!(table.stats.get("Jail"), 1);
        assert_eq!(table.player.roll_history, vec![2, 4]);
        assert_eq!(
            outcome.events,
            vec![
                TurnEvent::DoublesRolled { streak: 3 },
                TurnEvent::SentToJail {
                    reason: JailReason::ThreeDoubles
                },
                TurnEvent::Moved {
                    from: position_before,
                    to: 10
                },
            ]
        );
    }

    #[test]
    fn test_non_double_breaks_streak() {
        let mut table = Table::quiet();
        table.turn(1, 1);
        table.turn(1, 2);
        assert_eq!(table.player.doubles_streak, 0);
        table.turn(2, 2);
        table.turn(3, 3);
        assert_eq!(table.player.doubles_streak, 2);
        assert_eq!(table.player.position, 15);
        assert_eq!(table.stats.get("Jail"), 0);
    }

    #[test]
    fn test_go_to_jail_tile() {
        let mut table = Table::quiet().at(26);
        let outcome = table.turn(2, 3);

        assert_eq!(table.player.position, 10);
        assert_eq!(table.stats.get("Go To Jail"), 1);
        assert_eq!(table.stats.get("Jail"), 1);
        assert!(outcome.went_to_jail());
        assert!(!outcome.completed_lap());
    }

    #[test]
    fn test_landing_on_jail_cell_is_visiting() {
        let mut table = Table::quiet().at(5);
        table.turn(2, 3);

        assert_eq!(table.player.position, 11);
        assert_eq!(table.stats.get("Visiting Jail"), 1);
        assert_eq!(table.stats.get("Jail"), 0);
        assert!(!table.player.is_jailed(table.board.jail_index()));
    }

    #[test]
    fn test_jail_patience_runs_out() {
        let mut table = Table::quiet().at(10);

        for expected in [2, 1, 0] {
            let outcome = table.turn(1, 2);
            assert_eq!(table.player.position, 10);
            assert_eq!(table.player.jail_patience, expected);
            assert_eq!(
                outcome.events,
                vec![TurnEvent::StayedInJail {
                    patience_left: expected
                }]
            );
        }

        let outcome = table.turn(2, 3);
        assert_eq!(table.player.position, 15);
        assert_eq!(table.player.jail_patience, JAIL_PATIENCE);
        assert_eq!(table.player.roll_history, vec![3, 3, 3, 5]);
        assert_eq!(
            outcome.events[0],
            TurnEvent::LeftJail {
                via: JailRelease::PatienceExhausted
            }
        );
        assert_eq!(table.stats.get("C3"), 1);
    }

    #[test]
    fn test_double_leaves_jail() {
        let mut table = Table::quiet().at(10);
        let outcome = table.turn(2, 2);

        assert_eq!(table.player.position, 14);
        assert_eq!(table.player.doubles_streak, 0);
        assert_eq!(
            outcome.events[0],
            TurnEvent::LeftJail {
                via: JailRelease::Doubles
            }
        );
    }

    #[test]
    fn test_escape_card_used_before_patience() {
        let mut table = Table::quiet().at(10);
        table.player.hold(
            Card {
                text: "Get Out of Jail Free".into(),
                kind: CardKind::Basic,
            },
            DeckKind::Chance,
        );

        let outcome = table.turn(1, 2);
        assert_eq!(table.player.position, 13);
        assert_eq!(table.player.jail_patience, JAIL_PATIENCE);
        assert!(table.player.held_cards.is_empty());
        assert_eq!(
            table.decks.chance.discard_pile().last().unwrap().text,
            "Get Out of Jail Free"
        );
        assert_eq!(
            outcome.events[0],
            TurnEvent::LeftJail {
                via: JailRelease::Card(DeckKind::Chance)
            }
        );
    }

    #[test]
    fn test_escape_card_is_kept() {
        let mut table =
            Table::with_chance("Get Out of Jail Free;Get Out of Jail\nPay;Money;Player;Bank;15\n")
                .at(5);
        table.turn(1, 1);

        assert_eq!(table.player.position, 7);
        assert_eq!(table.player.held_from(DeckKind::Chance), 1);
        assert_eq!(table.decks.chance.len(), 1);
        assert_eq!(table.decks.chance.discard_len(), 0);
    }

    #[test]
    fn test_money_card_is_discarded() {
        let mut table = Table::quiet().at(5);
        table.turn(1, 1);

        assert_eq!(table.decks.chance.discard_len(), 1);
        assert_eq!(table.decks.chance.len(), 2);
        assert_eq!(table.player.position, 7);
    }

    #[test]
    fn test_named_travel_counts_lap() {
        let mut table = Table::with_chance("Advance to Go;Travel;Go\n").at(4);
        let outcome = table.turn(1, 2);

        assert_eq!(table.player.position, 0);
        assert_eq!(table.player.laps_completed, 1);
        assert_eq!(table.stats.get("Go"), 1);
        assert_eq!(outcome.snapshots.len(), 1);
        assert_eq!(outcome.snapshots[0].visits["CH1"], 1);
    }

    #[test]
    fn test_named_travel_forward_no_lap() {
        let mut table = Table::with_chance("Walk;Travel;Boardwalk\n").at(4);
        let outcome = table.turn(1, 2);

        assert_eq!(table.player.position, 40);
        assert_eq!(table.stats.get("H2"), 1);
        assert!(!outcome.completed_lap());
    }

    #[test]
    fn test_travel_to_jail_is_not_a_lap() {
        let mut table = Table::with_chance("Go to Jail;Travel;Jail\n").at(35);
        let outcome = table.turn(1, 1);

        assert_eq!(table.player.position, 10);
        assert!(!outcome.completed_lap());
        assert!(outcome.went_to_jail());
        assert_eq!(table.stats.get("Jail"), 1);
        assert!(table.player.is_jailed(table.board.jail_index()));
    }

    #[test]
    fn test_nearest_railroad_wraps_with_lap() {
        let mut table = Table::with_chance("Nearest;Travel;Railroad\n").at(35);
        let outcome = table.turn(1, 1);

        assert_eq!(table.player.position, 5);
        assert_eq!(table.player.laps_completed, 1);
        assert_eq!(outcome.snapshots.len(), 1);
        assert_eq!(table.stats.get("R1"), 1);
    }

    #[test]
    fn test_nearest_utility_ahead() {
        let mut table = Table::with_chance("Nearest;Travel;Utility\n").at(20);
        let outcome = table.turn(1, 2);

        assert_eq!(table.player.position, 29);
        assert_eq!(table.stats.get("CH2"), 1);
        assert_eq!(table.stats.get("U2"), 1);
        assert!(!outcome.completed_lap());
    }

    #[test]
    fn test_two_laps_in_one_turn() {
        let mut table = Table::with_chance("Advance to Go;Travel;Go\n").at(37);
        // 48 wraps to CH1, then the card sends the token round again
        let outcome = table.turn(6, 5);
        assert_eq!(outcome.snapshots.len(), 2);
        assert_eq!(table.player.position, 0);
        assert_eq!(table.player.laps_completed, 2);
    }

    #[test]
    fn test_unknown_destination_is_an_error() {
        let mut table = Table::with_chance("Trip;Travel;Atlantis\n").at(4);
        let mut dice = LoadedDice::new([(1, 2)]);
        let err = execute_turn(
            &mut table.player,
            &table.board,
            &mut table.decks,
            &mut table.stats,
            &mut dice,
            &mut table.rng,
        )
        .unwrap_err();
        assert_eq!(
            err,
            SimError::Lookup(LookupError::UnknownDestination("Atlantis".into()))
        );
    }

    #[test]
    fn test_position_out_of_bounds() {
        let mut table = Table::quiet().at(41);
        let mut dice = LoadedDice::new([(1, 2)]);
        let err = execute_turn(
            &mut table.player,
            &table.board,
            &mut table.decks,
            &mut table.stats,
            &mut dice,
            &mut table.rng,
        )
        .unwrap_err();
        assert_eq!(
            err,
            SimError::PositionOutOfBounds {
                position: 41,
                len: 41
            }
        );
    }
}
