use std::fmt;

/// A value position in an instruction: an integer literal used in place,
/// or a named value.
///
/// Named values cover numbered virtual registers (`%0`, `%1`, ...) as
/// well as stack slots and parameter registers, which are named after
/// their binding (`%x`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// An integer literal.
    Literal(i64),
    /// A named register or slot, stored without the `%` sigil.
    Register(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Register(name) => write!(f, "%{name}"),
        }
    }
}

/// Arithmetic opcodes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Signed division.
    Sdiv,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opcode = match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Sdiv => "sdiv",
        };
        write!(f, "{opcode}")
    }
}

/// Comparison predicates for `icmp`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Signed greater-or-equal; the lowering of `>`.
    Sge,
    /// Signed less-or-equal; the lowering of `<`.
    Sle,
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let predicate = match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Sge => "sge",
            Self::Sle => "sle",
        };
        write!(f, "{predicate}")
    }
}

/// One pseudo-assembly instruction.
///
/// Instruction lists are append-only: once emitted, no later pass
/// mutates earlier instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// A branch target such as `if:` or `end:`.
    Label(String),
    /// Allocates a stack slot for a binding: `%x = alloca`.
    Alloca {
        /// The slot name.
        slot: String,
    },
    /// Stores a value into a slot: `store 5, %x`.
    Store {
        /// The value being stored.
        value: Operand,
        /// The destination slot.
        slot:  String,
    },
    /// Materializes a value into a register: `%0 = load %x`.
    Load {
        /// The destination register.
        dest:  String,
        /// The literal or slot being loaded.
        value: Operand,
    },
    /// Loads a variable captured from an enclosing function:
    /// `%0 = load-free x`.
    LoadFree {
        /// The destination register.
        dest: String,
        /// The free variable's name.
        name: String,
    },
    /// An arithmetic operation: `%2 = add %0, %1`.
    Binary {
        /// The destination register.
        dest:  String,
        /// The opcode.
        op:    BinaryOp,
        /// Left operand.
        left:  Operand,
        /// Right operand.
        right: Operand,
    },
    /// A comparison: `%2 = icmp eq %0, %1`. Always followed by a `zext`
    /// so comparisons materialize as 0/1 integers.
    Icmp {
        /// The destination register.
        dest:      String,
        /// The comparison predicate.
        predicate: Predicate,
        /// Left operand.
        left:      Operand,
        /// Right operand.
        right:     Operand,
    },
    /// Widens a comparison bit to an integer: `%3 = zext %2 to i32`.
    Zext {
        /// The destination register.
        dest:  String,
        /// The register being widened.
        value: String,
    },
    /// A conditional branch:
    /// `br i1 %0, label %if, label %else`.
    CondBr {
        /// The register holding the condition.
        condition:  String,
        /// Target when the condition holds.
        then_label: String,
        /// Target otherwise.
        else_label: String,
    },
    /// An unconditional branch: `br label %end`.
    Br {
        /// The branch target.
        label: String,
    },
    /// A call: `%2 = call @add(i32 %x, i32 3)`. Arguments carry an
    /// explicit `i32` type tag.
    Call {
        /// The destination register.
        dest:      String,
        /// The callee's function symbol, without the `@` sigil.
        callee:    String,
        /// The rendered arguments, in order.
        arguments: Vec<Operand>,
    },
    /// Builds a closure value from a function symbol and its ordered
    /// free-variable list: `%0 = create-closure @add, [x]`.
    CreateClosure {
        /// The destination register.
        dest:     String,
        /// The function symbol, without the `@` sigil.
        function: String,
        /// The free variables, in first-capture order.
        free:     Vec<String>,
    },
    /// Returns a value: `ret %2`.
    Ret {
        /// The returned register or literal.
        value: Operand,
    },
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(name) => write!(f, "{name}:"),
            Self::Alloca { slot } => write!(f, "%{slot} = alloca"),
            Self::Store { value, slot } => write!(f, "store {value}, %{slot}"),
            Self::Load { dest, value } => write!(f, "%{dest} = load {value}"),
            Self::LoadFree { dest, name } => write!(f, "%{dest} = load-free {name}"),
            Self::Binary { dest, op, left, right } => {
                write!(f, "%{dest} = {op} {left}, {right}")
            },
            Self::Icmp { dest,
                         predicate,
                         left,
                         right, } => {
                write!(f, "%{dest} = icmp {predicate} {left}, {right}")
            },
            Self::Zext { dest, value } => write!(f, "%{dest} = zext %{value} to i32"),
            Self::CondBr { condition,
                           then_label,
                           else_label, } => {
                write!(f, "br i1 %{condition}, label %{then_label}, label %{else_label}")
            },
            Self::Br { label } => write!(f, "br label %{label}"),
            Self::Call { dest, callee, arguments } => {
                let arguments = arguments.iter()
                                         .map(|operand| format!("i32 {operand}"))
                                         .collect::<Vec<_>>()
                                         .join(", ");
                write!(f, "%{dest} = call @{callee}({arguments})")
            },
            Self::CreateClosure { dest, function, free } => {
                write!(f, "%{dest} = create-closure @{function}, [{}]", free.join(", "))
            },
            Self::Ret { value } => write!(f, "ret {value}"),
        }
    }
}
