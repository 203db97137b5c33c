/// The equation banner. Holds the active question and its precomputed
/// answer; regenerated every time the active target is resolved.
use rand::Rng;
use rand::RngCore;

use crate::constants::EQUATION_Y;
use crate::entity::generator::Tier;
use crate::entity::Frame;
use crate::rect::Bounds;
use crate::surface::{Align, Color, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
}

impl Op {
    pub fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => 'x',
        }
    }
}

#[derive(Clone, Debug)]
pub struct Equation {
    pub tier: Tier,
    pub num1: i32,
    pub num2: i32,
    pub op: Op,
    pub answer: i32,
}

impl Equation {
    pub fn new(tier: Tier, rng: &mut dyn RngCore) -> Self {
        let mut eq = Equation {
            tier,
            num1: 0,
            num2: 0,
            op: Op::Add,
            answer: 0,
        };
        eq.regenerate(rng);
        eq
    }

    /// Draws a fresh question. Subtraction operands are swapped so the
    /// answer is never negative; multiplication redraws both operands from
    /// 1..=5 to keep products tractable.
    pub fn regenerate(&mut self, rng: &mut dyn RngCore) {
        self.num1 = rng.gen_range(1..=10);
        self.num2 = rng.gen_range(1..=10);

        let ops: &[Op] = match self.tier {
            Tier::One | Tier::Two => &[Op::Add, Op::Sub],
            Tier::Three => &[Op::Add, Op::Sub, Op::Mul],
        };
        self.op = ops[rng.gen_range(0..ops.len())];

        match self.op {
            Op::Add => self.answer = self.num1 + self.num2,
            Op::Sub => {
                if self.num1 < self.num2 {
                    std::mem::swap(&mut self.num1, &mut self.num2);
                }
                self.answer = self.num1 - self.num2;
            }
            Op::Mul => {
                self.num1 = rng.gen_range(1..=5);
                self.num2 = rng.gen_range(1..=5);
                self.answer = self.num1 * self.num2;
            }
        }
    }

    /// Recomputes `num1 op num2` (test oracle for the stored answer).
    pub fn eval(&self) -> i32 {
        match self.op {
            Op::Add => self.num1 + self.num2,
            Op::Sub => self.num1 - self.num2,
            Op::Mul => self.num1 * self.num2,
        }
    }

    pub fn answer(&self) -> i32 {
        self.answer
    }

    pub fn update(&mut self, _frame: &mut Frame) -> bool {
        false
    }

    pub fn render(&self, surface: &mut dyn Surface, bounds: Bounds) {
        let text = format!("{} {} {} = ?", self.num1, self.op.symbol(), self.num2);
        let box_w = 200.0;
        let box_x = (bounds.width - box_w) / 2.0;

        surface.fill_rect(box_x - 10.0, EQUATION_Y - 30.0, box_w, 50.0, Color::White);
        surface.stroke_rect(box_x - 10.0, EQUATION_Y - 30.0, box_w, 50.0, Color::Black);
        surface.text(
            &text,
            bounds.width / 2.0,
            EQUATION_Y,
            24.0,
            Color::Black,
            Align::Center,
        );
    }
}
