//! Planar chain of axial springs hanging between two fixed anchors.
//!
//! Free nodes carry a downward load `weight`. Each segment is a linear
//! axial spring of stiffness `k` and rest length `L`:
//!
//! ```text
//! U = Σ_seg ½ k (ℓ − L)²  +  Σ_node weight · y
//! ```
//!
//! The residual is `E = ∇U` and the stiffness `K = −∇²U`. Per segment, with
//! unit direction `u` and current length `ℓ`, the Hessian block is
//! `k [u uᵀ + (1 − L/ℓ)(I − u uᵀ)]`.
//!
//! In tension-only mode a segment with `ℓ ≤ L` carries no force and no
//! stiffness. Nodes between two slack segments then have a zero diagonal
//! and are left to the per-DOF fallback.

use faer::Mat;

use statix_solver::MechanicalSystem;

/// Below this length a segment's direction is undefined and it is ignored.
const DEGENERATE_LENGTH: f64 = 1e-12;

/// Hanging chain. DOFs are `[x0, y0, x1, y1, ...]` for the free nodes.
#[derive(Debug, Clone)]
pub struct SpringChain {
    pub anchor_start: [f64; 2],
    pub anchor_end: [f64; 2],
    pub rest_length: f64,
    pub spring_stiffness: f64,
    pub weight: f64,
    pub tension_only: bool,
    positions: Vec<f64>,
    residual: Vec<f64>,
    stiffness: Mat<f64>,
    energy: f64,
}

impl SpringChain {
    /// A chain of `free_nodes` nodes placed evenly on the anchor chord.
    pub fn new(
        anchor_start: [f64; 2],
        anchor_end: [f64; 2],
        free_nodes: usize,
        rest_length: f64,
        spring_stiffness: f64,
        weight: f64,
    ) -> Self {
        let n = 2 * free_nodes;
        let mut chain = Self {
            anchor_start,
            anchor_end,
            rest_length,
            spring_stiffness,
            weight,
            tension_only: false,
            positions: vec![0.0; n],
            residual: vec![0.0; n],
            stiffness: Mat::zeros(n, n),
            energy: 0.0,
        };
        chain.place_on_chord(0.0);
        chain
    }

    /// Taut chain: span 10, ten segments of rest length 0.9.
    pub fn taut() -> Self {
        Self::new([0.0, 0.0], [10.0, 0.0], 9, 0.9, 100.0, 1.0)
    }

    /// Slack tension-only cable: span 6, ten segments of rest length 0.9.
    pub fn slack_cable() -> Self {
        Self::new([0.0, 0.0], [6.0, 0.0], 9, 0.9, 500.0, 1.0).with_tension_only(true)
    }

    pub fn with_tension_only(mut self, tension_only: bool) -> Self {
        self.tension_only = tension_only;
        self
    }

    pub fn free_nodes(&self) -> usize {
        self.positions.len() / 2
    }

    pub fn segments(&self) -> usize {
        self.free_nodes() + 1
    }

    /// Position of node `i` where `0` and `free_nodes + 1` are the anchors.
    pub fn node(&self, i: usize) -> [f64; 2] {
        if i == 0 {
            self.anchor_start
        } else if i == self.free_nodes() + 1 {
            self.anchor_end
        } else {
            [self.positions[2 * (i - 1)], self.positions[2 * (i - 1) + 1]]
        }
    }

    /// Current length of segment `s` (between nodes `s` and `s + 1`).
    pub fn segment_length(&self, s: usize) -> f64 {
        let a = self.node(s);
        let b = self.node(s + 1);
        (b[0] - a[0]).hypot(b[1] - a[1])
    }

    /// Places the free nodes evenly along the chord, then lowers them onto
    /// a parabola of depth `sag`.
    fn place_on_chord(&mut self, sag: f64) {
        let count = self.free_nodes();
        let [ax, ay] = self.anchor_start;
        let [bx, by] = self.anchor_end;
        for i in 0..count {
            let t = (i + 1) as f64 / (count + 1) as f64;
            self.positions[2 * i] = ax + t * (bx - ax);
            self.positions[2 * i + 1] = ay + t * (by - ay) - 4.0 * sag * t * (1.0 - t);
        }
    }

    /// Sag depth of a parabola whose arc length matches the total rest
    /// length, or zero when the chord is already longer.
    fn parabolic_sag(&self) -> f64 {
        let [ax, ay] = self.anchor_start;
        let [bx, by] = self.anchor_end;
        let span = (bx - ax).hypot(by - ay);
        let total = self.rest_length * self.segments() as f64;
        if total <= span {
            0.0
        } else {
            (3.0 * span * (total - span) / 8.0).sqrt()
        }
    }

    /// DOF index of the x coordinate of node `i`, if it is free.
    fn dof_base(&self, i: usize) -> Option<usize> {
        if i == 0 || i == self.free_nodes() + 1 {
            None
        } else {
            Some(2 * (i - 1))
        }
    }

    fn add_block(&mut self, row: Option<usize>, col: Option<usize>, block: &[[f64; 2]; 2], sign: f64) {
        if let (Some(r), Some(c)) = (row, col) {
            for a in 0..2 {
                for b in 0..2 {
                    // K is the negated Hessian.
                    self.stiffness[(r + a, c + b)] -= sign * block[a][b];
                }
            }
        }
    }
}

impl MechanicalSystem for SpringChain {
    fn n_dofs(&self) -> usize {
        self.positions.len()
    }

    fn get_dofs(&self) -> Vec<f64> {
        self.positions.clone()
    }

    fn set_dofs(&mut self, dofs: &[f64]) {
        self.positions.copy_from_slice(dofs);
    }

    fn change_dof(&mut self, index: usize, delta: f64) {
        self.positions[index] += delta;
    }

    fn state_update_forces(&mut self) {
        let n = self.positions.len();
        self.residual.iter_mut().for_each(|r| *r = 0.0);
        self.stiffness = Mat::zeros(n, n);
        self.energy = 0.0;

        for node in 0..self.free_nodes() {
            self.residual[2 * node + 1] += self.weight;
            self.energy += self.weight * self.positions[2 * node + 1];
        }

        let k = self.spring_stiffness;
        let rest = self.rest_length;
        for s in 0..self.segments() {
            let a = self.node(s);
            let b = self.node(s + 1);
            let d = [b[0] - a[0], b[1] - a[1]];
            let length = d[0].hypot(d[1]);
            if length < DEGENERATE_LENGTH {
                continue;
            }
            let strain = length - rest;
            if self.tension_only && strain <= 0.0 {
                continue;
            }

            self.energy += 0.5 * k * strain * strain;

            let u = [d[0] / length, d[1] / length];
            let force = [k * strain * u[0], k * strain * u[1]];
            let from = self.dof_base(s);
            let to = self.dof_base(s + 1);
            if let Some(i) = from {
                self.residual[i] -= force[0];
                self.residual[i + 1] -= force[1];
            }
            if let Some(j) = to {
                self.residual[j] += force[0];
                self.residual[j + 1] += force[1];
            }

            let lateral = 1.0 - rest / length;
            let mut block = [[0.0; 2]; 2];
            for (r, row) in block.iter_mut().enumerate() {
                for (c, entry) in row.iter_mut().enumerate() {
                    let identity = if r == c { 1.0 } else { 0.0 };
                    let axial = u[r] * u[c];
                    *entry = k * (axial + lateral * (identity - axial));
                }
            }
            self.add_block(from, from, &block, 1.0);
            self.add_block(to, to, &block, 1.0);
            self.add_block(from, to, &block, -1.0);
            self.add_block(to, from, &block, -1.0);
        }
    }

    fn residual(&self) -> Vec<f64> {
        self.residual.clone()
    }

    fn stiffness(&self) -> Mat<f64> {
        self.stiffness.clone()
    }

    fn energy(&self) -> f64 {
        self.energy
    }

    /// Re-shapes the chain onto a parabola whose length matches the rest
    /// length. A taut chain is laid back onto its chord.
    fn robust_step(&mut self) {
        let sag = self.parabolic_sag();
        self.place_on_chord(sag);
    }

    fn name(&self) -> &str {
        if self.tension_only {
            "slack_cable"
        } else {
            "spring_chain"
        }
    }
}
