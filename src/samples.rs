pub struct Sample {
    pub name: &'static str,
    pub title: &'static str,
    pub source: &'static str,
}

pub const SAMPLES: &[Sample] = &[
    Sample {
        name: "fibonacci",
        title: "Fibonacci",
        source: "
// Fibonacci sequence
a = 0
b = 1
i = 0
while (i < 10) {
    print(a)
    temp = a + b
    a = b
    b = temp
    i = i + 1
}
",
    },
    Sample {
        name: "factorial",
        title: "Factorial",
        source: "
// Factorial of 6
n = 6
result = 1
i = 1
while (i <= n) {
    result = result * i
    i = i + 1
}
print(result)
",
    },
    Sample {
        name: "fizzbuzz",
        title: "FizzBuzz",
        source: "
// Count 1 to 15
i = 1
while (i <= 15) {
    print(i)
    i = i + 1
}
",
    },
    Sample {
        name: "expressions",
        title: "Expressions",
        source: "
x = 2 ** 10
y = x / 4 + 3 * 5
z = y % 7
print(x)
print(y)
print(z)
",
    },
];

pub fn find(name: &str) -> Option<&'static Sample> {
    SAMPLES.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}
