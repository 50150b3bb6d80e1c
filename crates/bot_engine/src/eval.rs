//! Static position evaluation: material plus a pawn placement bonus.

use shakmaty::{Chess, Color, Position, Role, Square};

/// Material values in centipawns, indexed by `Role` discriminant order:
/// Pawn, Knight, Bishop, Rook, Queen, King.
const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 0];

/// Pawn placement bonus from White's perspective, indexed by square
/// (a1 = 0 .. h8 = 63). Rewards central pawns and advanced pawns.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  5,  5, -10, -10,  5,  5,  0,
     0, 10, -5,   0,   0, -5, 10,  0,
     0, 10, 10,  20,  20, 10, 10,  0,
     5, 20, 20,  30,  30, 20, 20,  5,
    10, 20, 20,  30,  30, 20, 20, 10,
    50, 50, 50,  50,  50, 50, 50, 50,
    90, 90, 90,  90,  90, 90, 90, 90,
     0,  0,  0,   0,   0,  0,  0,  0,
];

/// Evaluates the position in centipawns, positive for White.
///
/// Each piece contributes its material value; pawns additionally read
/// the placement table, mirrored vertically for Black.
pub fn evaluate(position: &Chess) -> i32 {
    let mut value = 0i32;

    let board = position.board();
    for square in board.occupied() {
        let Some(piece) = board.piece_at(square) else {
            continue;
        };
        let mut piece_value = PIECE_VALUES[role_index(piece.role)];
        if piece.role == Role::Pawn {
            piece_value += PAWN_TABLE[table_index(square, piece.color)];
        }
        value += if piece.color == Color::White {
            piece_value
        } else {
            -piece_value
        };
    }

    value
}

/// Capture value of a piece in pawn units, used by the greedy policy.
pub fn capture_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 1,
        Role::Knight | Role::Bishop => 3,
        Role::Rook => 5,
        Role::Queen => 9,
        Role::King => 0,
    }
}

fn role_index(role: Role) -> usize {
    match role {
        Role::Pawn => 0,
        Role::Knight => 1,
        Role::Bishop => 2,
        Role::Rook => 3,
        Role::Queen => 4,
        Role::King => 5,
    }
}

fn table_index(square: Square, color: Color) -> usize {
    match color {
        Color::White => usize::from(square),
        Color::Black => usize::from(square.flip_vertical()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_balanced() {
        assert_eq!(evaluate(&Chess::default()), 0);
    }

    #[test]
    fn extra_material_favors_its_owner() {
        use shakmaty::{fen::Fen, CastlingMode};

        // White has an extra queen.
        let position: Chess = "3qk3/8/8/8/8/8/8/2QQK3 w - - 0 1"
            .parse::<Fen>()
            .unwrap()
            .into_position(CastlingMode::Standard)
            .unwrap();
        assert!(evaluate(&position) > 0);
    }

    #[test]
    fn pawn_bonus_mirrors_for_black() {
        use shakmaty::{fen::Fen, CastlingMode};

        // A white pawn on e4 and a black pawn on e5 cancel out.
        let position: Chess = "4k3/8/8/4p3/4P3/8/8/4K3 w - - 0 1"
            .parse::<Fen>()
            .unwrap()
            .into_position(CastlingMode::Standard)
            .unwrap();
        assert_eq!(evaluate(&position), 0);
    }
}
